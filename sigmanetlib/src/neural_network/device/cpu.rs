use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Perform computations on CPU using single or multiple threads policy.
///
/// Note that multithreaded policy will allocate additional memory
/// to store gradients within the thread until it's resolved.
pub struct CPUDevice {
    /// Maximal amount of threads `CPUDevice` can allocate for processing
    /// a single batch. It's recommended to not to make this value too large,
    /// otherwise unreasonable amount of time would be spent on spawning
    /// threads instead of doing usable computations.
    ///
    /// If set to 0 then all the computations will be done in the current thread.
    pub max_threads: usize
}

impl CPUDevice {
    #[inline]
    /// Create device which uses up to `max_threads` threads per batch.
    pub fn multithreaded(max_threads: usize) -> Self {
        Self {
            max_threads
        }
    }
}

impl Device for CPUDevice {
    fn gradients<F: Float>(
        &self,
        network: &Network<F>,
        examples: &[Example<F>]
    ) -> Result<Vec<Gradient<F>>, NetworkError> {
        if self.max_threads == 0 || examples.len() < 2 {
            return examples.iter()
                .map(|(input, expected)| network.gradient(input, expected))
                .collect();
        }

        let chunk_size = examples.len().div_ceil(self.max_threads);

        std::thread::scope(|scope| {
            let handles = examples.chunks(chunk_size)
                .map(|chunk| scope.spawn(move || {
                    chunk.iter()
                        .map(|(input, expected)| network.gradient(input, expected))
                        .collect::<Result<Vec<_>, _>>()
                }))
                .collect::<Vec<_>>();

            let mut gradients = Vec::with_capacity(examples.len());

            // Join in spawn order to keep gradients in the examples order.
            for handle in handles {
                match handle.join() {
                    Ok(chunk) => gradients.extend(chunk?),
                    Err(panic) => std::panic::resume_unwind(panic)
                }
            }

            Ok(gradients)
        })
    }
}

#[test]
/// Multithreaded gradients are identical to the single-threaded ones.
fn test_cpu_device_gradients() {
    let network = Network64::create_with(3, 2, 5, 2, &mut FastrandSampler::with_seed(5)).unwrap();
    let mut sampler = FastrandSampler::with_seed(6);

    let examples = (0..11)
        .map(|_| {
            let input = (0..3).map(|_| sampler.sample(0.0, 1.0)).collect();
            let expected = (0..2).map(|_| sampler.sample(0.0, 1.0)).collect();

            (input, expected)
        })
        .collect::<Vec<Example<f64>>>();

    let single = CPUDevice::default().gradients(&network, &examples).unwrap();

    for threads in [1, 2, 3, 4, 16] {
        let multi = CPUDevice::multithreaded(threads).gradients(&network, &examples).unwrap();

        assert_eq!(multi, single);
    }

    assert_eq!(
        Gradient::merge(&CPUDevice::multithreaded(4).gradients(&network, &examples).unwrap()).unwrap(),
        Gradient::merge(&single).unwrap()
    );
}

#[test]
/// Errors of any worker thread are returned to the caller.
fn test_cpu_device_shape_mismatch() {
    let network = Network64::create(2, 1, 2, 1).unwrap();

    let examples = vec![
        (vec![0.0, 0.0], vec![0.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0, 0.0]),
        (vec![1.0, 1.0], vec![0.0])
    ];

    assert!(CPUDevice::default().gradients(&network, &examples).is_err());
    assert!(CPUDevice::multithreaded(2).gradients(&network, &examples).is_err());
}
