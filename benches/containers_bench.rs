use RustedCalc::datastructures::assoc_store::AssocStore;
use RustedCalc::datastructures::ordered_sequence::OrderedSequence;
use RustedCalc::symbolic::bindings::Bindings;
use RustedCalc::symbolic::evaluator::evaluate;
use RustedCalc::symbolic::expr_node::ExprNode;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_delete_near_end(c: &mut Criterion) {
    c.bench_function("delete near end of 10k sequence", |b| {
        b.iter(|| {
            let mut list: OrderedSequence<usize> = (0..10_000).collect();
            while list.size() > 1 {
                list.delete(list.size() - 2).unwrap();
            }
            black_box(list)
        })
    });
}

fn bench_store_put_get(c: &mut Criterion) {
    c.bench_function("store 1000 puts and gets", |b| {
        b.iter(|| {
            let mut store = AssocStore::with_capacity(4);
            for i in 0..1000 {
                store.put(i, i * 2);
            }
            for i in 0..1000 {
                black_box(store.get(&i).unwrap());
            }
        })
    });
}

fn bench_evaluate_chain(c: &mut Criterion) {
    // x0 := 1, x_k := x_{k-1} + 1
    let mut bindings = Bindings::new();
    bindings.put("x0", ExprNode::number(1.0));
    for k in 1..200 {
        let previous = ExprNode::variable(&format!("x{}", k - 1));
        bindings.put(&format!("x{}", k), ExprNode::binary("+", previous, ExprNode::number(1.0)));
    }
    let last = ExprNode::variable("x199");
    c.bench_function("evaluate 200 chained bindings", |b| {
        b.iter(|| evaluate(black_box(&bindings), black_box(&last)).unwrap())
    });
}

criterion_group!(benches, bench_delete_near_end, bench_store_put_get, bench_evaluate_chain);
criterion_main!(benches);
