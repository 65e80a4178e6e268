/// Provider-neutral image generation request
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    /// Text description of the desired images
    pub prompt: String,
    /// Number of images to generate
    pub number_of_images: u32,
    /// Prompt adherence strength, for providers that support it
    pub guidance_scale: Option<f64>,
}
