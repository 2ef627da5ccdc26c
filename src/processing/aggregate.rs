//! Prefix aggregation.
//!
//! Reduces a set of IPv4 prefixes to the smallest set of CIDR blocks covering
//! exactly the same addresses.

use crate::models::Ipv4Net;

/// Aggregate prefixes into the minimal set of covering blocks.
///
/// Prefixes contained in another prefix are absorbed, and sibling blocks
/// that together fill their parent are replaced by the parent. Passes repeat
/// until nothing changes; every pass that changes something removes at least
/// one block, so this terminates.
///
/// # Returns
/// Non-overlapping blocks in ascending network address order.
pub fn aggregate<I>(prefixes: I) -> Vec<Ipv4Net>
where
    I: IntoIterator<Item = Ipv4Net>,
{
    let mut blocks: Vec<Ipv4Net> = prefixes.into_iter().collect();
    let input_count = blocks.len();
    let mut passes = 0;

    loop {
        blocks.sort_unstable();
        blocks.dedup();
        let before = blocks.len();

        blocks = absorb_contained(blocks);
        blocks = merge_siblings(blocks);
        passes += 1;

        if blocks.len() == before {
            break;
        }
    }

    log::debug!(
        "Aggregated {input_count} prefixes into {} blocks in {passes} passes",
        blocks.len()
    );
    blocks
}

/// Drop every block covered by an earlier one. Input must be sorted.
///
/// Sorting puts a covering block before anything it contains, and the kept
/// blocks stay disjoint, so only the last kept block can cover the next one.
fn absorb_contained(blocks: Vec<Ipv4Net>) -> Vec<Ipv4Net> {
    let mut kept: Vec<Ipv4Net> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match kept.last() {
            Some(last) if last.contains(&block) => {}
            _ => kept.push(block),
        }
    }
    kept
}

/// Replace adjacent sibling pairs by their parent. Input must be sorted and
/// disjoint.
fn merge_siblings(blocks: Vec<Ipv4Net>) -> Vec<Ipv4Net> {
    let mut merged: Vec<Ipv4Net> = Vec::with_capacity(blocks.len());
    for block in blocks {
        merged.push(block);
        // a merge can complete the sibling of the block below it
        while let [.., lower, upper] = merged.as_slice() {
            let (lower, upper) = (*lower, *upper);
            match lower.parent() {
                Some(parent) if lower.is_lower_sibling_of(&upper) => {
                    merged.truncate(merged.len() - 2);
                    merged.push(parent);
                }
                _ => break,
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn nets(prefixes: &[&str]) -> Vec<Ipv4Net> {
        prefixes.iter().map(|p| p.parse().unwrap()).collect()
    }

    fn agg(prefixes: &[&str]) -> Vec<String> {
        aggregate(nets(prefixes))
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_merge_siblings() {
        assert_eq!(agg(&["10.0.0.0/25", "10.0.0.128/25"]), vec!["10.0.0.0/24"]);
    }

    #[test]
    fn test_disjoint_kept_in_order() {
        assert_eq!(
            agg(&["10.0.1.0/24", "10.0.0.0/24"]),
            vec!["10.0.0.0/23"],
            "10.0.0.0/24 and 10.0.1.0/24 are siblings"
        );
        assert_eq!(
            agg(&["10.0.2.0/24", "10.0.1.0/24"]),
            vec!["10.0.1.0/24", "10.0.2.0/24"]
        );
    }

    #[test]
    fn test_numeric_order() {
        assert_eq!(
            agg(&["100.0.0.0/8", "9.0.0.0/8", "20.0.0.0/8"]),
            vec!["9.0.0.0/8", "20.0.0.0/8", "100.0.0.0/8"]
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert!(agg(&[]).is_empty());
        assert_eq!(agg(&["192.0.2.0/24"]), vec!["192.0.2.0/24"]);
        assert_eq!(agg(&["0.0.0.0/0"]), vec!["0.0.0.0/0"]);
    }

    #[test]
    fn test_containment() {
        assert_eq!(
            agg(&["10.0.0.0/24", "10.0.0.0/8", "10.200.3.0/24", "10.0.0.0/16"]),
            vec!["10.0.0.0/8"]
        );
    }

    #[test]
    fn test_duplicates() {
        assert_eq!(
            agg(&["192.0.2.0/24", "192.0.2.0/24"]),
            vec!["192.0.2.0/24"]
        );
    }

    #[test]
    fn test_recursive_merge() {
        assert_eq!(
            agg(&[
                "10.0.0.0/24",
                "10.0.1.0/25",
                "10.0.1.128/26",
                "10.0.1.192/26",
                "10.0.2.0/23",
            ]),
            vec!["10.0.0.0/22"]
        );
    }

    #[test]
    fn test_overlap_off_boundary() {
        // /23 with a /24 and a /25 hanging off its end
        assert_eq!(
            agg(&["10.0.2.0/23", "10.0.3.0/24", "10.0.4.0/24", "10.0.5.0/25"]),
            vec!["10.0.2.0/23", "10.0.4.0/24", "10.0.5.0/25"]
        );
    }

    #[test]
    fn test_top_of_address_space() {
        assert_eq!(
            agg(&["255.255.255.254/32", "255.255.255.255/32", "128.0.0.0/1"]),
            vec!["128.0.0.0/1"]
        );
        assert_eq!(agg(&["0.0.0.0/1", "128.0.0.0/1"]), vec!["0.0.0.0/0"]);
    }

    /// Address ranges covered by `prefixes` as merged half-open intervals.
    fn ranges(prefixes: &[Ipv4Net]) -> Vec<(u64, u64)> {
        let mut sorted = prefixes.to_vec();
        sorted.sort();
        let mut out: Vec<(u64, u64)> = Vec::new();
        for p in sorted {
            let lo = u64::from(u32::from(p.lo()));
            let hi = lo + p.size();
            match out.last_mut() {
                Some(last) if lo <= last.1 => last.1 = last.1.max(hi),
                _ => out.push((lo, hi)),
            }
        }
        out
    }

    fn check_aggregate(input: &[Ipv4Net]) {
        let output = aggregate(input.iter().copied());

        assert_eq!(ranges(input), ranges(&output), "union changed for {input:?}");
        for pair in output.windows(2) {
            assert!(pair[0] < pair[1], "not ascending: {output:?}");
            assert!(
                u32::from(pair[0].hi()) < u32::from(pair[1].lo()),
                "overlap in {output:?}"
            );
            assert!(
                !pair[0].is_lower_sibling_of(&pair[1]),
                "unmerged siblings in {output:?}"
            );
        }
        for block in &output {
            assert!(
                input.iter().any(|p| block.contains(p)),
                "{block} covers no input prefix"
            );
        }
        assert_eq!(aggregate(output.iter().copied()), output, "not a fixed point");
    }

    #[test]
    fn test_bolero_aggregate_whole_space() {
        bolero::check!()
            .with_type::<Vec<(u32, u8)>>()
            .for_each(|input| {
                let prefixes: Vec<Ipv4Net> = input
                    .iter()
                    .map(|&(addr, len)| Ipv4Net::truncate(Ipv4Addr::from(addr), len % 33).unwrap())
                    .collect();
                check_aggregate(&prefixes);
            });
    }

    #[test]
    fn test_bolero_aggregate_dense() {
        // a small corner of the space, so merges and overlaps are common
        bolero::check!()
            .with_type::<Vec<(u16, u8)>>()
            .for_each(|input| {
                let prefixes: Vec<Ipv4Net> = input
                    .iter()
                    .map(|&(addr, len)| {
                        let addr = Ipv4Addr::from(0x0A00_0000 | u32::from(addr & 0x03FF));
                        Ipv4Net::truncate(addr, 22 + len % 11).unwrap()
                    })
                    .collect();
                check_aggregate(&prefixes);
            });
    }
}
