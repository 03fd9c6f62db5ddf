use backtrace::{Backtrace, BacktraceFmt, BacktraceFrame, PrintFmt};
use std::fmt::{self, Formatter};
use std::panic::PanicInfo;

/// Frames from these are noise in a panic report; a run of them is
/// collapsed into a single "abbreviated" line
const NOISY_FRAME_PREFIXES: &[&'static str] = &[
    "backtrace::",
    "std::sys_common::backtrace::",
    "std::panicking",
    "core::panicking",
    "rust_begin_unwind",
    "jokester::ui::backtrace::",
    "jokester::prepare_panic_capture",
];

/// Nothing below the main loop is interesting
const ROOT_FRAME_PREFIX: &str = "jokester::app::looper::app_loop";

/// A panic captured while the terminal was in raw mode, to be reported
/// once it has been restored
pub struct PanicData {
    pub info: String,
    pub trace: Backtrace,
}

impl PanicData {
    pub fn capture(info: &PanicInfo) -> Self {
        Self {
            info: info.to_string(),
            trace: Backtrace::new(),
        }
    }
}

fn frame_matches<F: Fn(&str) -> bool>(frame: &BacktraceFrame, predicate: F) -> bool {
    frame.symbols().iter().any(|s| match s.name() {
        Some(name) => predicate(&name.to_string()),
        None => false,
    })
}

fn is_noisy(frame: &BacktraceFrame) -> bool {
    frame_matches(frame, |name| {
        NOISY_FRAME_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
    })
}

fn is_root(frame: &BacktraceFrame) -> bool {
    frame_matches(frame, |name| name.starts_with(ROOT_FRAME_PREFIX))
}

impl fmt::Display for PanicData {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        writeln!(fmt, "{}", self.info)?;

        let mut print_path =
            move |fmt: &mut Formatter<'_>, path: backtrace::BytesOrWideString<'_>| path.fmt(fmt);
        let mut f = BacktraceFmt::new(fmt, PrintFmt::Short, &mut print_path);

        let mut in_noise = false;
        for frame in self.trace.frames() {
            if is_noisy(frame) {
                if !in_noise {
                    print_abbreviated(&mut f, frame)?;
                }
                in_noise = true;
                continue;
            }
            in_noise = false;

            f.frame().backtrace_frame(frame)?;

            if is_root(frame) {
                print_abbreviated(&mut f, frame)?;
                break;
            }
        }

        Ok(())
    }
}

fn print_abbreviated(f: &mut BacktraceFmt, frame: &BacktraceFrame) -> fmt::Result {
    f.frame().print_raw(
        frame.ip(),
        Some(backtrace::SymbolName::new(
            " ... abbreviated ... ".as_bytes(),
        )),
        None,
        None,
    )
}
