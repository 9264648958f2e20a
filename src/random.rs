use rand::Rng;

/// Picks an index into a fixed response list.
pub trait RandomSource: Send + Sync {
    /// Returns a value in `0..len`. `len` is never zero.
    fn index(&self, len: usize) -> usize;
}

pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

pub fn choose<'a>(random: &dyn RandomSource, items: &[&'a str]) -> &'a str {
    items[random.index(items.len()) % items.len()]
}


#[cfg(test)]
mod tests {
    use super::testing::{FixedIndex, Scripted};
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        for _ in 0..100 {
            assert!(ThreadRandom.index(4) < 4);
        }
    }

    #[test]
    fn choose_uses_the_source() {
        let items = ["a", "b", "c"];
        assert_eq!(choose(&FixedIndex(2), &items), "c");

        let scripted = Scripted::new(&[1, 0]);
        assert_eq!(choose(&scripted, &items), "b");
        assert_eq!(choose(&scripted, &items), "a");
    }

    #[test]
    fn choose_wraps_out_of_range_indices() {
        assert_eq!(choose(&FixedIndex(5), &["a", "b"]), "b");
    }
}
