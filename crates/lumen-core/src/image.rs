use bytes::Bytes;

/// One generated image: encoded bitmap bytes and their position in the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    index: usize,
    bytes: Bytes,
}

impl Image {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw encoded payload as returned by the provider
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

/// Ordered images produced by one successful generation call
///
/// Built once from the provider payloads and never changed afterwards.
/// Indices are assigned from the payload order, starting at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    images: Vec<Image>,
}

impl GenerationResult {
    pub fn from_payloads<I>(payloads: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        let images = payloads
            .into_iter()
            .enumerate()
            .map(|(index, bytes)| Image {
                index,
                bytes: bytes.into(),
            })
            .collect();

        Self { images }
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
