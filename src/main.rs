#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

reexport!(testing, test);
reexport!(config);
reexport!(error);
reexport!(dialect);
reexport!(syntax);
reexport!(completion);
reexport!(connection);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

/// Dev loop: read SQL from stdin with the default rule, buffering lines
/// while the scanner reports an open construct, then dump the spans of
/// each completed statement.
fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let rule = SyntaxRule::default_rule();
    let mut buffer = String::new();
    for line in std::io::stdin().lines() {
        buffer.push_str(&line?);
        buffer.push('\n');
        if needs_more_input(&buffer, rule) {
            continue;
        }
        for span in classify(&buffer, rule) {
            println!("{:>16}  {:?}", span.kind.as_str(), span.text(&buffer));
        }
        buffer.clear();
    }
    Ok(())
}
