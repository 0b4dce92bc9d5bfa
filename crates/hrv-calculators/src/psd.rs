//! Spectral calculators
//!
//! Every estimator except Lomb-Scargle first brings the series onto the
//! regular grid `t0 + k / interpolation_freq`. Evenly sampled signals that
//! already run at that rate are used as they are.

use crate::spectrum::{Spectrum, SpectrumParams};
use hrv_core::math::{demean, linspace};
use hrv_core::{interpolate_to_rate, PsdMethod, Result};
use hrv_signal::{Calculator, DataSource};
use hrv_spectral::{hamming, lomb_scargle, power_spectrum, welch, yule_walker, ArModel};
use std::f64::consts::PI;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fewest frequency bins the Welch, AR and Lomb-Scargle estimators produce
const MIN_SPECTRUM_BINS: usize = 128;

fn regular_series<D: DataSource + ?Sized>(data: &D, params: &SpectrumParams) -> Result<Vec<f64>> {
    if let Some(fs) = data.evenly_sampled_at() {
        if (fs - params.interpolation_freq).abs() < 1e-9 {
            return Ok(data.values().to_vec());
        }
    }
    let (_, values) = interpolate_to_rate(
        &data.times(),
        data.values(),
        params.interpolation_freq,
        params.interpolation_kind,
    )?;
    Ok(values)
}

fn centered(values: Vec<f64>, remove_mean: bool) -> Vec<f64> {
    if remove_mean {
        demean(&values)
    } else {
        values
    }
}

fn with_bands(powers: Vec<f64>, params: &SpectrumParams, normalize: bool) -> Result<Spectrum> {
    let bands = linspace(0.0, params.interpolation_freq / 2.0, powers.len());
    Spectrum::from_raw(bands, powers, normalize)
}

/// Raw squared-magnitude spectrum of the Hamming-windowed series
///
/// The windowed frame is centred before the transform and the first
/// `ceil(n / 2)` bins are kept. Powers are never normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct FftSpectrum;

impl Calculator for FftSpectrum {
    type Params = SpectrumParams;
    type Output = Spectrum;

    fn name(&self) -> &'static str {
        "fft_spectrum"
    }

    fn compute<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &SpectrumParams,
    ) -> Result<Spectrum> {
        let series = regular_series(data, params)?;
        let window = hamming(series.len());
        let frame: Vec<f64> = series.iter().zip(&window).map(|(x, w)| x * w).collect();
        let powers = power_spectrum(&demean(&frame));
        with_bands(powers, params, false)
    }
}

/// Hamming-windowed periodogram
#[derive(Debug, Clone, Copy, Default)]
pub struct PsdFft;

impl Calculator for PsdFft {
    type Params = SpectrumParams;
    type Output = Spectrum;

    fn name(&self) -> &'static str {
        "psd_fft"
    }

    fn compute<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &SpectrumParams,
    ) -> Result<Spectrum> {
        let series = centered(regular_series(data, params)?, params.remove_mean);
        let window = hamming(series.len());
        let frame: Vec<f64> = series.iter().zip(&window).map(|(x, w)| x * w).collect();
        with_bands(power_spectrum(&frame), params, params.normalize)
    }
}

/// Welch's averaged periodogram
#[derive(Debug, Clone, Copy, Default)]
pub struct PsdWelch;

impl Calculator for PsdWelch {
    type Params = SpectrumParams;
    type Output = Spectrum;

    fn name(&self) -> &'static str {
        "psd_welch"
    }

    fn compute<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &SpectrumParams,
    ) -> Result<Spectrum> {
        let series = centered(regular_series(data, params)?, params.remove_mean);
        let nfft = series.len().max(MIN_SPECTRUM_BINS);
        let powers = welch(&series, params.interpolation_freq, nfft)?;
        with_bands(powers, params, params.normalize)
    }
}

/// Lomb-Scargle periodogram of the raw, irregular series
///
/// Frequencies run over `(0, interpolation_freq / 2]`; the DC bin is
/// dropped. Powers are `sqrt(4 * P / n)` of the unnormalized periodogram.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsdLombScargle;

impl Calculator for PsdLombScargle {
    type Params = SpectrumParams;
    type Output = Spectrum;

    fn name(&self) -> &'static str {
        "psd_lomb_scargle"
    }

    fn compute<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &SpectrumParams,
    ) -> Result<Spectrum> {
        let values = centered(data.values().to_vec(), params.remove_mean);
        let n = values.len();
        let bins = n.max(MIN_SPECTRUM_BINS);
        let bands: Vec<f64> = linspace(0.0, params.interpolation_freq / 2.0, bins)
            .into_iter()
            .skip(1)
            .collect();
        let angular: Vec<f64> = bands.iter().map(|f| 2.0 * PI * f).collect();

        // Instants come from the source: beat times for a signal, the running
        // sum of the intervals for a bare RR series. The periodogram takes
        // angular frequencies; `bands` stay in Hz.
        let periodogram = lomb_scargle(&data.times(), &values, &angular)?;
        let powers = periodogram
            .iter()
            .map(|p| (4.0 * p / n as f64).sqrt())
            .collect();
        Spectrum::from_raw(bands, powers, params.normalize)
    }
}

fn ar_spectrum(model: &ArModel, samples: usize, params: &SpectrumParams) -> Result<Spectrum> {
    let nfft = samples.max(MIN_SPECTRUM_BINS);
    let mut powers = model.psd(nfft)?;
    powers.truncate(nfft.div_ceil(2));
    with_bands(powers, params, params.normalize)
}

fn first_order_or_unit(series: &[f64]) -> ArModel {
    yule_walker(series, 1).unwrap_or_else(|err| {
        warn!(error = %err, "order-1 AR fit failed, using the unit model");
        ArModel::unit()
    })
}

/// Spectrum of a first-order autoregressive fit
#[derive(Debug, Clone, Copy, Default)]
pub struct PsdAr1;

impl Calculator for PsdAr1 {
    type Params = SpectrumParams;
    type Output = Spectrum;

    fn name(&self) -> &'static str {
        "psd_ar1"
    }

    fn compute<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &SpectrumParams,
    ) -> Result<Spectrum> {
        let series = centered(regular_series(data, params)?, params.remove_mean);
        let model = first_order_or_unit(&series);
        ar_spectrum(&model, series.len(), params)
    }
}

/// Spectrum of an autoregressive fit at the configured order ceiling
///
/// Orders `1..=ar_max_order` are fitted in turn and the last model wins.
/// An order that cannot be fitted falls back to the order-1 model.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsdAr;

impl Calculator for PsdAr {
    type Params = SpectrumParams;
    type Output = Spectrum;

    fn name(&self) -> &'static str {
        "psd_ar"
    }

    fn compute<D: DataSource + ?Sized>(
        &self,
        data: &D,
        params: &SpectrumParams,
    ) -> Result<Spectrum> {
        let series = centered(regular_series(data, params)?, params.remove_mean);
        let mut model = ArModel::unit();
        for order in 1..=params.ar_max_order.max(1) {
            model = match yule_walker(&series, order) {
                Ok(fitted) => fitted,
                Err(err) => {
                    warn!(order, error = %err, "AR fit failed, falling back to order 1");
                    first_order_or_unit(&series)
                }
            };
        }
        debug!(order = model.order(), noise = model.noise_variance, "AR model selected");
        ar_spectrum(&model, series.len(), params)
    }
}

/// Power spectral density with the chosen estimator
pub fn psd<D: DataSource + ?Sized>(
    data: &D,
    method: PsdMethod,
    params: &SpectrumParams,
    use_cache: bool,
) -> Result<Arc<Spectrum>> {
    match method {
        PsdMethod::Fft => PsdFft.get(data, params, use_cache),
        PsdMethod::Welch => PsdWelch.get(data, params, use_cache),
        PsdMethod::LombScargle => PsdLombScargle.get(data, params, use_cache),
        PsdMethod::Ar1 => PsdAr1.get(data, params, use_cache),
        PsdMethod::Ar => PsdAr.get(data, params, use_cache),
    }
}
