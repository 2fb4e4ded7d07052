#[derive(Debug, Clone, PartialEq)]
pub enum BorderMode<T> {
    Clamp,
    Constant(T),
    Reflect101,
}

impl<T> BorderMode<T> {
    /// Maps coordinate `i` into `[0, len)` according to the border rule.
    ///
    /// In-range coordinates map to themselves under every mode. Out-of-range
    /// coordinates return `None` for `Constant` (the caller substitutes the
    /// fill value); `Clamp` and `Reflect101` return `None` only for
    /// `len == 0`.
    pub fn map(&self, i: isize, len: usize) -> Option<usize> {
        if (0..len as isize).contains(&i) {
            return Some(i as usize);
        }

        match self {
            Self::Constant(_) => None,
            Self::Clamp => {
                if len == 0 {
                    None
                } else if i < 0 {
                    Some(0)
                } else {
                    Some(len - 1)
                }
            }
            Self::Reflect101 => {
                match len {
                    0 => None,
                    1 => Some(0),
                    _ => {
                        let period = (2 * len - 2) as isize;
                        let r = i.rem_euclid(period) as usize;
                        if r < len {
                            Some(r)
                        } else {
                            Some((2 * len - 2) - r)
                        }
                    }
                }
            }
        }
    }
}
