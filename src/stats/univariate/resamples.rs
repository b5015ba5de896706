use crate::stats::rand_util::Rng;

/// Case resampling: draws, with replacement, as many elements as the original sample has
///
/// The stage buffer is allocated on the first draw and reused afterwards. The generator is
/// passed to every call so the caller decides how random streams are laid out.
pub struct Resamples<'a, T>
where
    T: Copy,
{
    sample: &'a [T],
    stage: Option<Vec<T>>,
}

#[allow(clippy::should_implement_trait)]
impl<'a, T> Resamples<'a, T>
where
    T: 'a + Copy,
{
    /// # Panics
    ///
    /// Panics if `sample` is empty
    pub fn new(sample: &'a [T]) -> Resamples<'a, T> {
        assert!(!sample.is_empty());

        Resamples {
            sample,
            stage: None,
        }
    }

    /// Draws the next resample using `rng`
    pub fn next(&mut self, rng: &mut Rng) -> &[T] {
        let sample = self.sample;
        let n = sample.len() as u64;

        match self.stage {
            None => {
                let stage = (0..n)
                    .map(|_| sample[rng.rand_range(0..n) as usize])
                    .collect::<Vec<_>>();

                self.stage = Some(stage);
            }
            Some(ref mut stage) => {
                for elem in stage.iter_mut() {
                    *elem = sample[rng.rand_range(0..n) as usize];
                }
            }
        }

        match self.stage {
            Some(ref v) => &v[..],
            None => unreachable!(),
        }
    }
}
