//! Per-user fan-out.
//!
//! Each stage is a pure function of one user's ordered fixes.  `apply_per_user`
//! maps it over all users and returns the results in user order.  With the
//! `parallel` feature and `n_jobs != 1` the map runs on a Rayon pool; the
//! first error aborts the whole dispatch.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{CoreError, UserId};

/// Execution options shared by all stages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dispatch {
    /// `1` runs sequentially, `0` or negative uses every logical core, `n > 1`
    /// uses a dedicated pool of `n` threads.
    pub n_jobs:         i32,
    /// Log one `INFO` event per finished user.
    pub print_progress: bool,
}

impl Default for Dispatch {
    fn default() -> Self {
        Self { n_jobs: 1, print_progress: false }
    }
}

impl Dispatch {
    pub fn new(n_jobs: i32, print_progress: bool) -> Self {
        Self { n_jobs, print_progress }
    }
}

fn report(opts: Dispatch, user: UserId, done: usize, total: usize) {
    if opts.print_progress {
        tracing::info!(user_id = user.0, done, total, "user processed");
    }
}

/// Apply `f` to every `(user, group)` pair, preserving input order.
pub fn apply_per_user<'a, T, U, E, F>(
    groups: Vec<(UserId, &'a [T])>,
    opts:   Dispatch,
    f:      F,
) -> Result<Vec<U>, E>
where
    T: Sync,
    U: Send,
    E: Send + From<CoreError>,
    F: Fn(UserId, &'a [T]) -> Result<U, E> + Sync,
{
    let total = groups.len();

    #[cfg(feature = "parallel")]
    if opts.n_jobs != 1 && total > 1 {
        use rayon::prelude::*;

        let threads = if opts.n_jobs > 1 { opts.n_jobs as usize } else { 0 };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| E::from(CoreError::WorkerPool(e.to_string())))?;
        let done = AtomicUsize::new(0);

        return pool.install(|| {
            groups
                .into_par_iter()
                .map(|(user, group)| {
                    let out = f(user, group)?;
                    report(opts, user, done.fetch_add(1, Ordering::Relaxed) + 1, total);
                    Ok::<U, E>(out)
                })
                .collect()
        });
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(i, (user, group))| {
            let out = f(user, group)?;
            report(opts, user, i + 1, total);
            Ok::<U, E>(out)
        })
        .collect()
}
