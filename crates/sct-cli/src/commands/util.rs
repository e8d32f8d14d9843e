#[cfg(feature = "parallel")]
use rayon::ThreadPoolBuilder;

#[cfg(feature = "parallel")]
pub fn configure_threads(threads: &str) {
    let count = if threads.eq_ignore_ascii_case("auto") {
        num_cpus::get()
    } else {
        threads.parse().unwrap_or_else(|_| num_cpus::get())
    };
    let _ = ThreadPoolBuilder::new().num_threads(count).build_global();
}

#[cfg(not(feature = "parallel"))]
pub fn configure_threads(_threads: &str) {}
