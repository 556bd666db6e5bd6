// 控制台输出模块
// Console output over a registered byte sink, plus the `log` backend.

use core::fmt;
use log::{Level, LevelFilter, Log, Metadata, Record};
use spin::Once;

/// A byte-transmit primitive. Implementations may block or silently drop;
/// the console never retries.
pub trait ByteSink: Sync {
    fn put_byte(&self, byte: u8);
}

static SINK: Once<&'static dyn ByteSink> = Once::new();

/// Registers the console sink. Only the first call has any effect; output
/// produced before registration is discarded.
pub fn set_sink(sink: &'static dyn ByteSink) {
    SINK.call_once(|| sink);
}

/// Returns `true` once a sink is registered.
pub fn has_sink() -> bool {
    SINK.is_completed()
}

/// 格式化输出函数
pub fn print(args: fmt::Arguments) {
    use core::fmt::Write;
    // Stdout never reports an error.
    let _ = Stdout.write_fmt(args);
}

/// 直接输出字符串
pub fn print_str(s: &str) {
    if let Some(sink) = SINK.get() {
        for byte in s.bytes() {
            put_char(*sink, byte);
        }
    }
}

/// 输出单个字符
pub fn print_char(ch: char) {
    let mut buf = [0u8; 4];
    print_str(ch.encode_utf8(&mut buf));
}

/// 输出十进制数字
pub fn print_num(num: usize) {
    print(format_args!("{}", num));
}

/// 输出十六进制数字
pub fn print_hex(num: usize) {
    print(format_args!("{:x}", num));
}

/// Serial terminals expect CR LF line endings.
fn put_char(sink: &dyn ByteSink, byte: u8) {
    if byte == b'\n' {
        sink.put_byte(b'\r');
    }
    sink.put_byte(byte);
}

/// 标准输出结构体，实现Write trait以支持格式化输出
pub struct Stdout;

impl fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        print_str(s);
        Ok(())
    }
}

/// `log` backend writing through the console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let color = match record.level() {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug | Level::Trace => "\x1b[90m",
        };
        print(format_args!(
            "{}[{}] {}: {}\x1b[0m\n",
            color,
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {}
}

/// Installs the console logger. Returns `false` if a logger was already set.
pub fn init_logger(level: LevelFilter) -> bool {
    let installed = log::set_logger(&LOGGER).is_ok();
    if installed {
        log::set_max_level(level);
    }
    installed
}

/// print宏 - 格式化输出
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::print(format_args!($($arg)*))
    };
}

/// println宏 - 格式化输出并换行
#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($($arg:tt)*) => {
        $crate::print!("{}\n", format_args!($($arg)*))
    };
}

/// 调试输出宏 - 带有文件和行号信息
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {{
        $crate::print!("[{}:{}] ", file!(), line!());
        $crate::println!($($arg)*);
    }};
}

/// 错误输出宏 - 红色高亮显示
#[macro_export]
macro_rules! error_print {
    ($($arg:tt)*) => {{
        $crate::print!("\x1b[31m[ERROR] ");
        $crate::print!($($arg)*);
        $crate::print!("\x1b[0m\n");
    }};
}

/// 警告输出宏 - 黄色高亮显示
#[macro_export]
macro_rules! warn_print {
    ($($arg:tt)*) => {{
        $crate::print!("\x1b[33m[WARN] ");
        $crate::print!($($arg)*);
        $crate::print!("\x1b[0m\n");
    }};
}

/// 信息输出宏 - 绿色高亮显示
#[macro_export]
macro_rules! info_print {
    ($($arg:tt)*) => {{
        $crate::print!("\x1b[32m[INFO] ");
        $crate::print!($($arg)*);
        $crate::print!("\x1b[0m\n");
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    struct Capture(RefCell<Vec<u8>>);

    // Tests drive the sink from a single thread.
    unsafe impl Sync for Capture {}

    impl ByteSink for Capture {
        fn put_byte(&self, byte: u8) {
            self.0.borrow_mut().push(byte);
        }
    }

    #[test]
    fn newline_expands_to_crlf() {
        let sink = Capture(RefCell::new(Vec::new()));
        for byte in b"a\nb".iter() {
            put_char(&sink, *byte);
        }
        assert_eq!(sink.0.borrow().as_slice(), b"a\r\nb");
    }

    #[test]
    fn logger_respects_max_level() {
        log::set_max_level(LevelFilter::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(ConsoleLogger.enabled(&warn));
        assert!(!ConsoleLogger.enabled(&info));
    }
}
