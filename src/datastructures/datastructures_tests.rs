//___________________________________STRESS TESTS____________________________________
// deletions near either end must stay cheap: these loops are quadratic if nodes are located by
// always walking from the front

#[cfg(test)]
mod tests {
    use crate::datastructures::assoc_store::AssocStore;
    use crate::datastructures::ordered_sequence::OrderedSequence;
    use std::f64::consts::PI;
    use std::time::{Duration, Instant};

    const SECOND: Duration = Duration::from_secs(1);

    fn make_pi_list(n: usize) -> OrderedSequence<String> {
        (0..n).map(|i| (i as f64 * PI).to_string()).collect()
    }

    #[test]
    fn test_delete_from_front() {
        let mut list = make_pi_list(1000);
        for i in 0..1000 {
            assert_eq!(list.get(0).unwrap(), &(i as f64 * PI).to_string());
            list.delete(0).unwrap();
        }
        assert!(list.is_empty());
    }

    #[test]
    fn test_delete_from_end() {
        let mut list = make_pi_list(100_000);
        let start = Instant::now();
        for i in (0..100_000).rev() {
            assert_eq!(list.get(i).unwrap(), &(i as f64 * PI).to_string());
            list.delete(i).unwrap();
        }
        assert!(list.is_empty());
        assert!(start.elapsed() < 10 * SECOND);
    }

    #[test]
    fn test_delete_from_near_end() {
        let mut list = make_pi_list(100_000);
        let last = (99_999.0 * PI).to_string();
        let start = Instant::now();
        for _ in 0..99_999 {
            assert_eq!(list.get(list.size() - 1).unwrap(), &last);
            list.delete(list.size() - 2).unwrap();
        }
        assert_eq!(list.size(), 1);
        assert_eq!(list.front(), Some(&last));
        assert!(start.elapsed() < 10 * SECOND);
    }

    #[test]
    fn test_interleaved_insert_delete_keeps_links() {
        let mut list: OrderedSequence<usize> = (0..50).collect();
        for i in 0..25 {
            list.insert(i * 2, 1000 + i).unwrap();
        }
        for i in 0..25 {
            assert_eq!(list.delete(i).unwrap(), 1000 + i);
        }
        let forward: Vec<usize> = list.iter().copied().collect();
        let mut backward: Vec<usize> = list.iter().rev().copied().collect();
        backward.reverse();
        assert_eq!(forward, (0..50).collect::<Vec<_>>());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_store_many_puts_and_removes() {
        let mut store: AssocStore<String, usize> = AssocStore::new();
        for i in 0..1000 {
            store.put(format!("key{}", i), i);
        }
        assert_eq!(store.capacity(), 1600);
        for i in (0..1000).step_by(2) {
            assert_eq!(store.remove(format!("key{}", i).as_str()), Ok(i));
        }
        assert_eq!(store.size(), 500);
        for i in 0..1000 {
            assert_eq!(store.contains_key(format!("key{}", i).as_str()), i % 2 == 1);
        }
    }
}
