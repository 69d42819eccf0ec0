use std::sync::Arc;

/// Contiguous owned element storage.
///
/// The buffer is reference counted, so reshapes and views of a dense tensor
/// share it without copying. Writes go through [`CpuStorage::as_mut_slice`],
/// which copies the buffer first if anything else still holds it.
#[derive(Debug)]
pub struct CpuStorage<T> {
    data: Arc<Vec<T>>,
}

impl<T> Clone for CpuStorage<T> {
    fn clone(&self) -> Self {
        CpuStorage {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> CpuStorage<T> {
    /// Create storage from a vector, in row-major order.
    pub fn from_vec(data: Vec<T>) -> Self {
        CpuStorage {
            data: Arc::new(data),
        }
    }

    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Returns true if another tensor or view still reads this buffer.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.data) > 1
    }

    /// Returns true if both handles point at the same buffer.
    pub fn ptr_eq(&self, other: &CpuStorage<T>) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: Clone> CpuStorage<T> {
    /// Returns the data as a mutable slice, detaching from other holders first.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let s = CpuStorage::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_clone_shares_buffer() {
        let s = CpuStorage::from_vec(vec![1, 2]);
        let t = s.clone();
        assert!(s.ptr_eq(&t));
        assert!(s.is_shared());
    }

    #[test]
    fn test_mut_slice_copies_on_write() {
        let mut s = CpuStorage::from_vec(vec![1.0, 2.0]);
        let snapshot = s.clone();
        s.as_mut_slice()[0] = 42.0;
        assert_eq!(s.as_slice()[0], 42.0);
        assert_eq!(snapshot.as_slice()[0], 1.0);
        assert!(!s.ptr_eq(&snapshot));
        assert!(!s.is_shared());
    }

    #[test]
    fn test_mut_slice_in_place_when_unique() {
        let mut s = CpuStorage::from_vec(vec![1, 2]);
        let before = s.as_slice().as_ptr();
        s.as_mut_slice()[1] = 7;
        assert_eq!(s.as_slice().as_ptr(), before);
        assert_eq!(s.as_slice(), &[1, 7]);
    }
}
