// 测试模块入口
// In-firmware self tests, run at boot with the `self-test` feature.


use crate::{error_print, info_print, println, warn_print};

/// 测试结果枚举
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// 测试用例结构体
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
    pub description: &'static str,
}

/// 测试运行器
pub struct TestRunner {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
}

impl TestRunner {
    /// 创建新的测试运行器
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
        }
    }

    /// 运行单个测试用例
    pub fn run_test(&mut self, test: &TestCase) {
        self.total += 1;

        println!("Running test: {} - {}", test.name, test.description);

        match (test.func)() {
            TestResult::Pass => {
                self.passed += 1;
                info_print!("  [PASS] {}", test.name);
            }
            TestResult::Fail => {
                self.failed += 1;
                error_print!("  [FAIL] {}", test.name);
            }
            TestResult::Skip => {
                self.skipped += 1;
                warn_print!("  [SKIP] {}", test.name);
            }
        }
    }

    /// 运行测试套件
    pub fn run_suite(&mut self, suite_name: &str, tests: &[TestCase]) {
        println!("=== {} Test Suite ===", suite_name);
        for test in tests {
            self.run_test(test);
        }
        println!("=== {} Test Suite Complete ===", suite_name);
    }

    /// 打印测试总结
    pub fn print_summary(&self) {
        println!("=== Test Summary ===");
        println!("Total tests: {}", self.total);
        info_print!("Passed: {}", self.passed);
        if self.failed > 0 {
            error_print!("Failed: {}", self.failed);
        } else {
            info_print!("Failed: {}", self.failed);
        }
        if self.skipped > 0 {
            warn_print!("Skipped: {}", self.skipped);
        }
        println!("==================");
    }

    /// 获取是否所有测试都通过
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.total > 0
    }

    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (self.total, self.passed, self.failed, self.skipped)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// 运行所有测试
pub fn run_all_tests() -> bool {
    let mut runner = TestRunner::new();

    console_test::run_console_tests(&mut runner);
    classify_test::run_classify_tests(&mut runner);
    alloc_test::run_alloc_tests(&mut runner);

    runner.print_summary();

    if runner.all_passed() {
        info_print!("All test suites completed successfully!");
    } else {
        warn_print!("Some tests failed or were skipped");
    }
    runner.all_passed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass() -> TestResult {
        TestResult::Pass
    }

    fn fail() -> TestResult {
        TestResult::Fail
    }

    fn skip() -> TestResult {
        TestResult::Skip
    }

    #[test]
    fn runner_counts_each_outcome() {
        let mut runner = TestRunner::new();
        runner.run_suite(
            "Runner",
            &[
                TestCase { name: "a", func: pass, description: "" },
                TestCase { name: "b", func: fail, description: "" },
                TestCase { name: "c", func: skip, description: "" },
            ],
        );
        assert_eq!(runner.counts(), (3, 1, 1, 1));
        assert!(!runner.all_passed());
    }

    #[test]
    fn empty_runner_has_not_passed() {
        assert!(!TestRunner::new().all_passed());
    }

    #[test]
    fn host_suites_pass() {
        assert!(run_all_tests());
    }
}
