use ringview::{RebalanceStrategy, create_view};

fn main() {
    let items = ["a", "b", "c", "d", "e"];
    let mut view = create_view(&items);
    println!("seed={:?}", view.slots());

    // Keep one slot on each side of the anchor. The missing left neighbour wraps to "e".
    view.rebalance(1, RebalanceStrategy::ByCount(1)).unwrap();
    let labels: Vec<_> = view.slots().iter().map(|s| items[s.index]).collect();
    println!("window={:?} labels={labels:?}", view.slots());

    // Moving the anchor right reuses the slots that stay and mints new identities for the rest.
    view.rebalance(2, RebalanceStrategy::ByCount(1)).unwrap();
    println!("window={:?} next_id={}", view.slots(), view.next_id());
}
