//! Pure arithmetic behind the numeric operations.

/// Primality by trial division over odd candidates up to the square root.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3u64;
    // i <= n / i avoids overflowing i * i near the top of the range.
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// First `n` Fibonacci numbers, seeded `[0, 1]`.
///
/// `u128` keeps every term exact up to n = 186.
pub fn fibonacci(n: usize) -> Vec<u128> {
    match n {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let mut seq: Vec<u128> = Vec::with_capacity(n);
            seq.push(0);
            seq.push(1);
            for i in 2..n {
                seq.push(seq[i - 1] + seq[i - 2]);
            }
            seq
        }
    }
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `None` when the result does not fit in `u64`.
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Folds over every element with the first one as the seed, so `values[0]`
/// is reduced twice. `lcm(x, x) == x` makes that observable-neutral.
pub fn lcm_of(values: &[u64]) -> Option<u64> {
    let (&seed, _) = values.split_first()?;
    values.iter().try_fold(seed, |acc, &v| lcm(acc, v))
}

/// Same seeding as [`lcm_of`]. Returns `None` for an empty slice.
pub fn hcf_of(values: &[u64]) -> Option<u64> {
    let (&seed, _) = values.split_first()?;
    Some(values.iter().fold(seed, |acc, &v| gcd(acc, v)))
}
