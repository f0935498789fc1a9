/// Which image of a fixed-size list is on screen.
///
/// `index < len` always holds; `advance` is the only way to move.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    /// Starts at the first image. Returns `None` for an empty list.
    pub fn new(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self { index: 0, len })
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves to the following image, wrapping back to the first after the last.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_selection() {
        assert_eq!(Selection::new(0), None);
    }

    #[test]
    fn advance_wraps_around() {
        let mut selection = Selection::new(3).expect("non-empty");
        assert_eq!(selection.index(), 0);
        assert_eq!(selection.advance(), 1);
        assert_eq!(selection.advance(), 2);
        assert_eq!(selection.advance(), 0);
    }

    #[test]
    fn single_entry_loops_on_itself() {
        let mut selection = Selection::new(1).expect("non-empty");
        for _ in 0..5 {
            assert_eq!(selection.advance(), 0);
        }
    }

    #[test]
    fn k_advances_land_on_k_mod_len() {
        for len in 1..7 {
            let mut selection = Selection::new(len).expect("non-empty");
            for k in 1..=3 * len {
                selection.advance();
                assert_eq!(selection.index(), k % len);
            }
        }
    }
}
