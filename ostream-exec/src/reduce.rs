// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! Serial terminal operations driven by repeated calls to `next()`.
//!
//! Every function here cancels the source before propagating an upstream
//! failure, per the stage's own contract — the `?`/`match` on `next()`'s
//! result never needs to call `.cancel()` itself for that case, since
//! `OrderedStream` implementations already cancel themselves on failure;
//! these only cancel explicitly when they stop pulling early for a reason
//! of their own (`count_where`/`contains`/`all_satisfy` short-circuiting).

use ostream_core::OrderedStream;

/// Drains `stream` into a `Vec`, preserving order. Cancels and returns the
/// failure if upstream ever fails.
pub async fn collect<S>(mut stream: S) -> Result<Vec<S::Item>, S::Error>
where
    S: OrderedStream,
{
    let mut out = Vec::new();
    while let Some(item) = stream.next().await? {
        out.push(item);
    }
    Ok(out)
}

/// Left-fold over every element.
pub async fn fold<S, B, F>(mut stream: S, init: B, mut f: F) -> Result<B, S::Error>
where
    S: OrderedStream,
    F: FnMut(B, S::Item) -> B,
{
    let mut acc = init;
    while let Some(item) = stream.next().await? {
        acc = f(acc, item);
    }
    Ok(acc)
}

/// Like [`fold`], but `f` mutates an accumulator in place instead of
/// threading it by value.
pub async fn reduce_into<S, B, F>(mut stream: S, mut acc: B, mut f: F) -> Result<B, S::Error>
where
    S: OrderedStream,
    F: FnMut(&mut B, S::Item),
{
    while let Some(item) = stream.next().await? {
        f(&mut acc, item);
    }
    Ok(acc)
}

/// The smallest element, by `Ord`. `None` if the stream was empty.
pub async fn min<S>(mut stream: S) -> Result<Option<S::Item>, S::Error>
where
    S: OrderedStream,
    S::Item: Ord,
{
    let mut best: Option<S::Item> = None;
    while let Some(item) = stream.next().await? {
        best = Some(match best {
            None => item,
            Some(current) => current.min(item),
        });
    }
    Ok(best)
}

/// The largest element, by `Ord`. `None` if the stream was empty.
pub async fn max<S>(mut stream: S) -> Result<Option<S::Item>, S::Error>
where
    S: OrderedStream,
    S::Item: Ord,
{
    let mut best: Option<S::Item> = None;
    while let Some(item) = stream.next().await? {
        best = Some(match best {
            None => item,
            Some(current) => current.max(item),
        });
    }
    Ok(best)
}

/// Counts elements matching `predicate`.
pub async fn count_where<S, P>(mut stream: S, mut predicate: P) -> Result<usize, S::Error>
where
    S: OrderedStream,
    P: FnMut(&S::Item) -> bool,
{
    let mut count = 0;
    while let Some(item) = stream.next().await? {
        if predicate(&item) {
            count += 1;
        }
    }
    Ok(count)
}

/// `true` if every element satisfies `predicate`. Cancels and stops pulling
/// as soon as one doesn't.
pub async fn all_satisfy<S, P>(mut stream: S, mut predicate: P) -> Result<bool, S::Error>
where
    S: OrderedStream,
    P: FnMut(&S::Item) -> bool,
{
    while let Some(item) = stream.next().await? {
        if !predicate(&item) {
            stream.cancel();
            return Ok(false);
        }
    }
    Ok(true)
}

/// `true` if any element equals `needle`. Cancels and stops pulling as soon
/// as a match is found.
pub async fn contains<S>(mut stream: S, needle: &S::Item) -> Result<bool, S::Error>
where
    S: OrderedStream,
    S::Item: PartialEq,
{
    while let Some(item) = stream.next().await? {
        if &item == needle {
            stream.cancel();
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ostream_ops::source::from_iter;

    #[tokio::test]
    async fn collect_preserves_order() {
        let out = collect(from_iter(0..5)).await.unwrap();
        assert_eq!(out, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn fold_sums_elements() {
        let sum = fold(from_iter(1..=4), 0, |acc, n| acc + n).await.unwrap();
        assert_eq!(sum, 10);
    }

    #[tokio::test]
    async fn min_and_max_over_a_stream() {
        assert_eq!(min(from_iter(vec![5, 1, 3])).await.unwrap(), Some(1));
        assert_eq!(max(from_iter(vec![5, 1, 3])).await.unwrap(), Some(3));
        assert_eq!(min(from_iter(Vec::<i32>::new())).await.unwrap(), None);
    }

    #[tokio::test]
    async fn count_where_counts_matches() {
        let count = count_where(from_iter(0..10), |n| n % 2 == 0).await.unwrap();
        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn all_satisfy_short_circuits() {
        let stream = from_iter(vec![2, 4, 5, 6]);
        assert!(!all_satisfy(stream, |n| n % 2 == 0).await.unwrap());
    }

    #[tokio::test]
    async fn contains_finds_a_match() {
        let found = contains(from_iter(vec![1, 2, 3]), &2).await.unwrap();
        assert!(found);
    }
}
