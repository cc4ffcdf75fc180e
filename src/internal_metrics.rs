use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

macro_rules! metrics {
    (
        $pub_container:ty {
            $field:ident: $internal_container:ident {
                $(
                    $(#[$meta:meta])*
                    $metric:ident: $ty:ident -> $pub_ty:ident,
                )*
            }
        }
    ) => {
        #[derive(Default)]
        pub(crate) struct $internal_container {
            $(
                $(#[$meta])*
                pub(crate) $metric: $ty,
            )*
        }

        impl $internal_container {
            pub fn sample(&self) -> impl Iterator<Item = emit::metric::Metric<'static, emit::empty::Empty>> + 'static {
                let $internal_container { $($metric),* } = self;

                [$(
                    emit::metric::Metric::new(
                        emit::pkg!(),
                        stringify!($metric),
                        <$ty>::AGG,
                        emit::empty::Empty,
                        $metric.sample(),
                        emit::empty::Empty,
                    ),
                )*]
                .into_iter()
            }
        }

        impl $pub_container {
            $(
                $(#[$meta])*
                pub fn $metric(&self) -> $pub_ty {
                    self.$field.$metric.sample()
                }
            )*
        }
    };
}

#[derive(Default)]
pub(crate) struct Counter(AtomicUsize);

impl Counter {
    const AGG: &'static str = emit::well_known::METRIC_AGG_COUNT;

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sample(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

metrics!(
    ClockMetrics {
        metrics: InternalMetrics {
            /**
            The displayed face was updated.
            */
            tick: Counter -> usize,
            /**
            Attempting to update the displayed face failed.
            */
            render_failed: Counter -> usize,
            /**
            The clock was calibrated against the top of the next minute.
            */
            calibrate: Counter -> usize,
            /**
            The clock element couldn't be found in the page during calibration.

            While the element is missing, ticks don't display anything.
            */
            element_missing: Counter -> usize,
            /**
            The page regained focus after being in the background.
            */
            focus_regained: Counter -> usize,
            /**
            The displayed face was stale after regaining focus, so the clock was re-calibrated.
            */
            resync: Counter -> usize,
            /**
            Attempting to schedule a timer failed.
            */
            schedule_failed: Counter -> usize,
        }
    }
);

/**
Metrics produced by the clock.

You can enumerate the metrics using the [`emit::metric::Source`] implementation. See [`emit::metric`] for details.
*/
pub struct ClockMetrics {
    pub(crate) metrics: Arc<InternalMetrics>,
}

impl emit::metric::Source for ClockMetrics {
    fn sample_metrics<S: emit::metric::sampler::Sampler>(&self, sampler: S) {
        for metric in self.metrics.sample() {
            sampler.metric(metric);
        }
    }
}
