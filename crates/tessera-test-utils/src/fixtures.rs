//! Canned registries shared by integration tests and benchmarks.
//!
//! - [`two_attribute_registry`]: the small sparse layout used to check
//!   intersection semantics by hand.
//! - [`particle_registry`]: three attributes of different types over
//!   overlapping striped domains, sized by the caller.

use tessera_store::AttributeRegistry;

use crate::{ranges, striped, TestRegistryBuilder};

/// `a: i32` over `{[0, 3), [10, 12)}` holding `[1, 2, 3, 9, 10]` and
/// `b: i32` over `{[1, 5), [10, 11)}` holding `[20, 21, 22, 23, 30]`.
///
/// Their common domain is `{[1, 3), [10, 11)}` with value pairs
/// `(2, 20), (3, 21), (9, 30)`.
pub fn two_attribute_registry() -> AttributeRegistry {
    two_attribute_builder().build()
}

/// [`two_attribute_registry`] with a custom split grain.
pub fn two_attribute_registry_with_grain(grain: usize) -> AttributeRegistry {
    two_attribute_layout(TestRegistryBuilder::with_grain(grain)).build()
}

fn two_attribute_builder() -> TestRegistryBuilder {
    two_attribute_layout(TestRegistryBuilder::new())
}

fn two_attribute_layout(builder: TestRegistryBuilder) -> TestRegistryBuilder {
    let a_values = [1, 2, 3, 9, 10];
    let b_values = [20, 21, 22, 23, 30];
    let a_domain = ranges(&[(0, 3), (10, 12)]);
    let b_domain = ranges(&[(1, 5), (10, 11)]);
    builder
        .with_attr("a", &a_domain, move |e| a_values[a_rank(e)])
        .with_attr("b", &b_domain, move |e| b_values[b_rank(e)])
}

fn a_rank(e: i64) -> usize {
    if e < 10 {
        e as usize
    } else {
        (e - 7) as usize
    }
}

fn b_rank(e: i64) -> usize {
    if e < 10 {
        (e - 1) as usize
    } else {
        4
    }
}

/// Three attributes over `blocks` striped blocks:
///
/// - `position: [f64; 3]` on every 8-entry block, stride 10.
/// - `mass: f32` on 6-entry blocks offset by 2, stride 10.
/// - `species: u16` on 4-entry blocks offset by 1, stride 5.
///
/// Values are derived from the entry id so results can be checked
/// without a second copy of the data.
pub fn particle_registry(blocks: usize, grain: usize) -> AttributeRegistry {
    TestRegistryBuilder::with_grain(grain)
        .with_attr("position", &striped(0, 10, 8, blocks), |e| {
            let x = e as f64;
            [x, x * 0.5, -x]
        })
        .with_attr("mass", &striped(2, 10, 6, blocks), |e| (e % 97) as f32 + 1.0)
        .with_attr("species", &striped(1, 5, 4, blocks * 2), |e| (e % 3) as u16)
        .build()
}
