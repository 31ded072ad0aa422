//! Subscriber installation.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install Accord's fmt subscriber as the global default.
///
/// The filter comes from `ACCORD_LOG`
/// (e.g. `ACCORD_LOG=accord_analysis::matching=debug,accord_core=warn`);
/// an unset or unparseable value means `accord=info`.
///
/// Returns `true` when Accord's subscriber is the global one and `false`
/// when the host had already installed its own. Only the first call does
/// any work; later calls return the same answer.
pub fn init_tracing() -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();

        match installed {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "keeping the host's global subscriber");
                false
            }
        }
    })
}
