use super::*;
use itertools::Itertools;

qc!(summary, _summary);
fn _summary(list: Vec<TestRoute>) -> bool {
    let t = trie(&list);
    let expected = reference(&list);
    t.len() == expected.len() && t.contents() == expected
}

qc!(structure, _structure);
fn _structure(list: Vec<TestRoute>) -> bool {
    let mut t = RSTrie::new();
    for route in list {
        t.insert_route(route.key());
        if !structure_ok(&t) {
            return false;
        }
    }
    true
}

qc!(every_route_is_covered, _every_route_is_covered);
fn _every_route_is_covered(list: Vec<TestRoute>) -> bool {
    let contents = trie(&list).contents();
    list.iter()
        .all(|r| contents.iter().any(|c| r.key().has_prefix(c)))
}

qc!(order_independent, _order_independent);
fn _order_independent(list: Vec<TestRoute>) -> bool {
    let t = trie(&list);
    let reversed = list.iter().rev().copied().collect::<Vec<_>>();
    let sorted = list.iter().sorted().copied().collect::<Vec<_>>();
    let longest_first = list
        .iter()
        .sorted_by_key(|r| std::cmp::Reverse(r.1))
        .copied()
        .collect::<Vec<_>>();
    t == trie(&reversed) && t == trie(&sorted) && t == trie(&longest_first)
}

qc!(idempotent, _idempotent);
fn _idempotent(list: Vec<TestRoute>) -> bool {
    let t = trie(&list);
    let twice = list.iter().chain(list.iter()).copied().collect::<Vec<_>>();
    let mut again = t.clone();
    again.extend(t.contents());
    t == trie(&twice) && t == again
}

qc!(clear_resets, _clear_resets);
fn _clear_resets((first, second): (Vec<TestRoute>, Vec<TestRoute>)) -> bool {
    let mut t = trie(&first);
    t.clear();
    t.extend(second.iter().map(TestRoute::key));
    t == trie(&second) && structure_ok(&t)
}

qc!(families, _families);
fn _families(list: Vec<(bool, TestRoute)>) -> bool {
    let mut rs = RouteSum::new();
    for (v4, route) in &list {
        let family = if *v4 { Family::V4 } else { Family::V6 };
        rs.insert(IpRoute::from_key(family, &route.key()));
    }
    let (v4, v6): (Vec<TestRoute>, Vec<TestRoute>) = list.iter().partition_map(|(v4, r)| {
        if *v4 {
            itertools::Either::Left(*r)
        } else {
            itertools::Either::Right(*r)
        }
    });
    rs.ipv4().contents() == reference(&v4)
        && rs.ipv6().contents() == reference(&v6)
        && rs.len() == rs.routes().count()
        && rs.routes().map(|r| r.key()).eq(reference(&v4).into_iter().chain(reference(&v6)))
}
