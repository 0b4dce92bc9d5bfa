//! Cached calculator protocol
//!
//! A [`Calculator`] is a stateless, named computation over a
//! [`DataSource`]. [`Calculator::get`] routes the computation through the
//! source's cache when one exists, so each (signal, calculator, parameters)
//! triple is computed at most once per cache lifetime.

use crate::signal::Signal;
use hrv_core::math::cumsum;
use hrv_core::{CacheKey, CalculatorCache, Error, Result};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::trace;

/// Input accepted by calculators
pub trait DataSource {
    /// Sample values
    fn values(&self) -> &[f64];

    /// Sample times in seconds
    fn times(&self) -> Vec<f64>;

    /// Cache results may be stored in, if the source has one
    fn cache(&self) -> Option<&CalculatorCache> {
        None
    }

    /// Sampling frequency, if the samples are evenly spaced
    fn evenly_sampled_at(&self) -> Option<f64> {
        None
    }
}

impl DataSource for Signal {
    fn values(&self) -> &[f64] {
        Signal::values(self)
    }

    fn times(&self) -> Vec<f64> {
        Signal::times(self)
    }

    fn cache(&self) -> Option<&CalculatorCache> {
        Some(Signal::cache(self))
    }

    fn evenly_sampled_at(&self) -> Option<f64> {
        self.is_evenly().then(|| self.sampling_freq())
    }
}

/// A bare series is read as RR intervals in milliseconds; it has no cache.
impl DataSource for [f64] {
    fn values(&self) -> &[f64] {
        self
    }

    fn times(&self) -> Vec<f64> {
        cumsum(self).into_iter().map(|t| t / 1000.0).collect()
    }
}

impl DataSource for Vec<f64> {
    fn values(&self) -> &[f64] {
        self
    }

    fn times(&self) -> Vec<f64> {
        self.as_slice().times()
    }
}

/// A named computation whose results can be cached on a signal
pub trait Calculator: Send + Sync {
    /// Parameters; their `Debug` rendering is part of the cache identity
    type Params: Debug + Clone + Send + Sync;
    type Output: Send + Sync + 'static;

    /// Stable identity, unique across calculators
    fn name(&self) -> &'static str;

    fn cache_key(&self, params: &Self::Params) -> CacheKey {
        CacheKey::new(self.name(), format!("{params:?}"))
    }

    /// The pure computation
    ///
    /// Concrete calculators override this; the default has no algorithm.
    fn compute<D: DataSource + ?Sized>(
        &self,
        _data: &D,
        _params: &Self::Params,
    ) -> Result<Self::Output> {
        Err(Error::NotImplemented(format!(
            "calculator '{}' has no compute step",
            self.name()
        )))
    }

    /// Cached result for `data`, computing it on first use
    ///
    /// With `use_cache = false`, or a source without a cache, the result is
    /// computed fresh and the cache is neither read nor written.
    fn get<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &Self::Params,
        use_cache: bool,
    ) -> Result<Arc<Self::Output>> {
        match data.cache() {
            Some(cache) if use_cache => {
                let key = self.cache_key(params);
                cache.get_or_compute(key, || self.compute(data, params))
            }
            _ => {
                trace!(calculator = self.name(), "computing without cache");
                self.compute(data, params).map(Arc::new)
            }
        }
    }
}
