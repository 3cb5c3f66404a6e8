#[cfg(test)]
pub mod test {
    use std::fmt;
    use std::io;
    use std::num::ParseIntError;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    use crate::env::Environ;
    use crate::set::VariableSet;
    use crate::variable::Variable;

    /// Build an environment from literal pairs.
    pub fn env(pairs: &[(&str, &str)]) -> Environ {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    /// A small launcher configuration, declared out of flag order.
    pub fn launcher_vars() -> Vec<Variable> {
        vec![
            Variable::new("wda-port", "t", "driver_port", 8100i64)
                .description(["Connect to WebDriverAgent listening on TCP `port`"]),
            Variable::new("build-config", "c", "proj_config", "Release").description([
                "Build target app using `config` from the selected scheme defined in Xcode project file",
            ]),
            Variable::new("target-app-source", "p", "proj_source", "")
                .description(["Directory `path` of the target app source code"]),
            Variable::new("trace", "g", "trace_agent", false).description([
                "Print each command in the init script before it is executed",
                "(useful for debugging)",
            ]),
            Variable::new("target-app-bundle", "a", "bundled_app", "com.example.Calculator.App")
                .description(["Bundle `ID` of the target app"]),
        ]
    }

    pub fn launcher_set(environ: Environ) -> VariableSet {
        VariableSet::with_environ(launcher_vars(), environ)
    }

    // -- Log capture ------------------------------------------------------------

    /// Shared in-memory sink for a test subscriber.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a thread-local subscriber and return everything logged at
    /// WARN or above, without ANSI colors.
    pub fn capture_warnings<F: FnOnce()>(f: F) -> String {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = sink.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    // -- Fixture for serial variables -------------------------------------------

    /// A duration in milliseconds, written as `"<n>ms"`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Millis(pub u64);

    impl fmt::Display for Millis {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}ms", self.0)
        }
    }

    impl FromStr for Millis {
        type Err = ParseIntError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            s.strip_suffix("ms").unwrap_or(s).parse().map(Millis)
        }
    }

    #[test]
    fn launcher_set_is_sorted() {
        let set = launcher_set(Environ::empty());
        let flags: Vec<&str> = set.iter().map(Variable::long).collect();
        assert_eq!(
            flags,
            [
                "build-config",
                "target-app-bundle",
                "target-app-source",
                "trace",
                "wda-port"
            ]
        );
    }
}
