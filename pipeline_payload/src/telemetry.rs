use crate::config::LogLevel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SDK_TARGETS: [&str; 4] = [
    "aws_config",
    "aws_smithy_runtime",
    "aws_sdk_s3",
    "aws_sdk_sagemakerruntime",
];

fn default_directives(log_level: &LogLevel) -> String {
    let mut directives = log_level.as_str().to_string();
    for target in SDK_TARGETS {
        directives.push_str(&format!(",{}=info", target));
    }
    directives
}

/// JSON lines on stdout, filtered by `RUST_LOG` when set.
pub fn init_tracing(log_level: &LogLevel) {
    let directives = default_directives(log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directives.into()),
        )
        .with(tracing_subscriber::fmt::layer().json().with_level(true))
        .init();
}
