/// Iterative Fibonacci with the convention F(0)=0, F(1)=1.
///
/// Accumulates in i64. The service caps the index at 1000, which is far past
/// F(92), the last term that fits in i64; larger indices wrap rather than
/// panic, so callers treating the result as exact must stay below that point.
pub fn compute(n: u32) -> i64 {
    if n == 0 {
        return 0;
    }

    let mut a = 0i64;
    let mut b = 1i64;
    for _ in 1..n {
        let sum = a.wrapping_add(b);
        a = b;
        b = sum;
    }
    b
}
