//!
//! Access to Parity
//!
//! Provides the utilities for reading profile access metadata through a
//! record source, normalizing it into comparable documents, and diffing
//! those documents across two or more profiles.
#![deny(missing_docs)]

pub use config::ProjectConfig;
pub use connectors::RecordSource;
pub use diff::{compare, CompareOptions, ComparisonResult};
pub use normalize::{NormalizeOptions, Normalizer};
pub use profile::NormalizedProfile;

pub mod config;
pub mod connectors;
pub mod diff;
pub mod logging;
pub mod normalize;
pub mod profile;
pub mod project;

#[cfg(test)]
pub(crate) mod test_util;

#[macro_export]
/// Time the code inside the macro. Write the elapsed time to debug logs.
/// Derived from https://notes.iveselov.info/programming/time_it-a-case-study-in-rust-macros
macro_rules! log_runtime {
    ($context:literal, $($tt:tt)+) => {
        {
            $crate::logging::debug!("{}: starting", $context);
            let timer = std::time::Instant::now();
            let x =
            $(
                $tt
            )+;
            $crate::logging::debug!("{}: {:?}", $context, timer.elapsed());
            x
        }
    }
}
