use anyhow::Result;
use clap::Args;
use tessera_config::MemoSettings;
use tessera_memo::{Capacity, Memo, MemoOptions};

use super::table::{Field, Layout, render};

/// Largest `n` whose Fibonacci number fits in a `u128`.
pub const MAX_FIB: u32 = 186;

#[derive(Args, Clone, Debug)]
pub struct FibArg {
    #[arg(value_parser = clap::value_parser!(u32).range(..=MAX_FIB as i64), help = "Index into the sequence")]
    pub n: u32,

    #[arg(long, help = "Cached entries to keep (default: memo.capacity)")]
    pub capacity: Option<usize>,

    #[arg(long, conflicts_with = "capacity", help = "Keep every entry")]
    pub unbounded: bool,
}

impl FibArg {
    fn limit(&self, settings: &MemoSettings) -> Option<usize> {
        if self.unbounded {
            return None;
        }
        // The recursion needs the two previous terms plus the one being stored.
        self.capacity.or(settings.limit()).map(|limit| limit.max(3))
    }
}

pub fn fibonacci(capacity: Capacity) -> Memo<u32, u128> {
    let options = MemoOptions::new().capacity(capacity).label("fib");
    Memo::with_options(options, |memo: &Memo<u32, u128>, &n: &u32| {
        if n < 2 {
            u128::from(n)
        } else {
            memo.invoke(n - 1) + memo.invoke(n - 2)
        }
    })
}

pub fn fib(arg: FibArg, settings: &MemoSettings) -> Result<()> {
    let memo = fibonacci(Capacity::from_limit(arg.limit(settings))?);
    let value = memo.invoke(arg.n);
    let info = memo.info();
    tracing::debug!(?info, "fib cache");

    let capacity = info
        .capacity
        .map_or_else(|| "unbounded".to_string(), |limit| limit.to_string());
    let fields = [
        Field::new("hits", info.hits),
        Field::new("misses", info.misses),
        Field::new("evictions", info.evictions),
        Field::new("size", info.size),
        Field::new("capacity", capacity),
    ];
    println!("fib({}) = {value}", arg.n);
    println!("{}", render(fields, Layout::titled("cache").hide_header()));
    Ok(())
}
