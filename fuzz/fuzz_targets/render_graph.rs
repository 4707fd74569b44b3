#![no_main]

use inspect_rs::value::Value;
use inspect_rs::{InspectOptions, Renderer};
use libfuzzer_sys::fuzz_target;

// Every pair of bytes links one node to another, so arbitrary input yields
// arbitrary (often cyclic) graphs.
fn build(data: &[u8]) -> Option<Value> {
    let count = (*data.first()? as usize % 8) + 1;
    let nodes: Vec<Value> = (0..count)
        .map(|i| if i % 2 == 0 { Value::new_vector() } else { Value::new_map() })
        .collect();
    for pair in data[1..].chunks_exact(2) {
        let from = &nodes[pair[0] as usize % count];
        let to = nodes[pair[1] as usize % count].clone();
        match from {
            Value::Vector(vector) => vector.push(to),
            Value::Map(map) => map.insert(Value::from(pair[1] as i64), to),
            _ => {}
        }
    }
    nodes.into_iter().next()
}

fuzz_target!(|data: &[u8]| {
    let Some(root) = build(data) else {
        return;
    };
    let renderer = Renderer::new(InspectOptions::default().with_initial_depth_budget(Some(4)));
    let header = renderer.header(&root, None).expect("header");
    let mut pending: Vec<_> = header.references().into_iter().cloned().collect();
    let mut expansions = 0;
    while let Some(reference) = pending.pop() {
        expansions += 1;
        if expansions > 64 {
            break;
        }
        let body = renderer
            .body(&reference.value, Some(&reference.token))
            .expect("body");
        pending.extend(body.references().into_iter().cloned());
    }
});
