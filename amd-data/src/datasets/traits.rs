use amd_core::AmdError;

/// Indexed access to a collection of items.
pub trait Dataset {
    /// The type of a single item.
    type Item: Send + 'static;

    /// Returns the item at `index`.
    ///
    /// # Errors
    /// `AmdError::InvalidArguments` if `index` is out of range, or any error
    /// raised while producing the item.
    fn get(&self, index: usize) -> Result<Self::Item, AmdError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
