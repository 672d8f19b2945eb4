// 数論ルーチン（Project Euler 1〜5）
// 各問題を1件の結果文字列として発行する

use crate::core::{Emit, WorkUnit};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;

/// 数論問題の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerProblem {
    /// 3または5の倍数の和（limit未満）
    MultiplesOf3Or5 { limit: u64 },
    /// 偶数フィボナッチ数の和（limit以下）
    EvenFibonacciSum { limit: u64 },
    /// 最大の素因数
    LargestPrimeFactor { number: u64 },
    /// n桁の数2つの積で最大の回文数
    LargestPalindromeProduct { digits: u32 },
    /// 1..=nの全てで割り切れる最小の数
    SmallestMultiple { upto: u64 },
}

impl EulerProblem {
    /// 元のスクリプトと同じ入力による5問
    pub fn classic_set() -> Vec<EulerProblem> {
        vec![
            EulerProblem::MultiplesOf3Or5 { limit: 1000 },
            EulerProblem::EvenFibonacciSum { limit: 4_000_000 },
            EulerProblem::LargestPrimeFactor {
                number: 600_851_475_143,
            },
            EulerProblem::LargestPalindromeProduct { digits: 3 },
            EulerProblem::SmallestMultiple { upto: 20 },
        ]
    }

    /// 短いラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::MultiplesOf3Or5 { .. } => "multiples-of-3-or-5",
            Self::EvenFibonacciSum { .. } => "even-fibonacci",
            Self::LargestPrimeFactor { .. } => "largest-prime-factor",
            Self::LargestPalindromeProduct { .. } => "largest-palindrome-product",
            Self::SmallestMultiple { .. } => "smallest-multiple",
        }
    }

    pub fn solve(&self) -> Result<u64> {
        match *self {
            Self::MultiplesOf3Or5 { limit } => Ok(sum_of_multiples(3, limit)
                + sum_of_multiples(5, limit)
                - sum_of_multiples(15, limit)),
            Self::EvenFibonacciSum { limit } => even_fibonacci_sum(limit),
            Self::LargestPrimeFactor { number } => largest_prime_factor(number),
            Self::LargestPalindromeProduct { digits } => largest_palindrome_product(digits),
            Self::SmallestMultiple { upto } => smallest_multiple(upto),
        }
    }
}

#[async_trait]
impl WorkUnit for EulerProblem {
    async fn run(&self, emitter: &mut dyn Emit) -> Result<()> {
        let problem = *self;
        let answer = tokio::task::spawn_blocking(move || problem.solve())
            .await
            .context("number theory task was cancelled")??;
        emitter.emit(format!("{:?} = {answer}", self)).await
    }
}

/// limit未満のfactorの倍数の和（等差数列の公式）
pub fn sum_of_multiples(factor: u64, limit: u64) -> u64 {
    if factor == 0 {
        return 0;
    }
    let n = limit.saturating_sub(1) / factor;
    factor * n * (n + 1) / 2
}

pub fn even_fibonacci_sum(limit: u64) -> Result<u64> {
    let (mut current, mut next) = (1u64, 2u64);
    let mut sum = 0u64;

    while current <= limit {
        if current % 2 == 0 {
            sum = sum.checked_add(current).context("sum overflowed u64")?;
        }
        let following = current.checked_add(next).context("fibonacci term overflowed u64")?;
        current = next;
        next = following;
    }
    Ok(sum)
}

/// 篩で求める素数の上限
///
/// これを超える候補は篩を作らず試し割りで調べるため、メモリ使用量は入力に依存しない
pub const SIEVE_LIMIT: usize = 1 << 20;

/// エラトステネスの篩
pub fn sieve_of_eratosthenes(limit: usize) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }

    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut p = 2;
    while p * p <= limit {
        if is_prime[p] {
            for multiple in (p * p..=limit).step_by(p) {
                is_prime[multiple] = false;
            }
        }
        p += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(n, &prime)| prime.then_some(n as u64))
        .collect()
}

pub fn largest_prime_factor(number: u64) -> Result<u64> {
    if number < 2 {
        bail!("{number} has no prime factors");
    }

    let limit = ((number as f64).sqrt() as usize + 1).min(SIEVE_LIMIT);
    let mut remaining = number;
    let mut largest = 1;

    for prime in sieve_of_eratosthenes(limit) {
        if prime * prime > remaining {
            break;
        }
        while remaining % prime == 0 {
            largest = prime;
            remaining /= prime;
        }
    }

    // 篩の範囲外は奇数で試し割り
    let mut candidate = (limit as u64 + 1) | 1;
    while candidate <= remaining / candidate {
        while remaining % candidate == 0 {
            largest = candidate;
            remaining /= candidate;
        }
        candidate += 2;
    }

    Ok(if remaining > 1 { remaining } else { largest })
}

pub fn is_palindrome_number(number: u64) -> bool {
    let mut reversed = 0u64;
    let mut rest = number;
    while rest != 0 {
        reversed = reversed * 10 + rest % 10;
        rest /= 10;
    }
    reversed == number
}

pub fn largest_palindrome_product(digits: u32) -> Result<u64> {
    if !(1..=6).contains(&digits) {
        bail!("digits must be between 1 and 6, got {digits}");
    }

    let low = 10u64.pow(digits - 1);
    let high = 10u64.pow(digits) - 1;
    let mut best = 0;

    for a in (low..=high).rev() {
        if a * high <= best {
            break;
        }
        for b in (low..=a).rev() {
            let product = a * b;
            if product <= best {
                break;
            }
            if is_palindrome_number(product) {
                best = product;
            }
        }
    }
    Ok(best)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn smallest_multiple(upto: u64) -> Result<u64> {
    (1..=upto).try_fold(1u64, |acc, n| {
        (acc / gcd(acc, n))
            .checked_mul(n)
            .with_context(|| format!("least common multiple of 1..={upto} overflowed u64"))
    })
}
