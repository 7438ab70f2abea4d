// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::problem::Problem;
use proptest::prelude::*;

impl Arbitrary for Problem {
    /// An inclusive range of variable counts. Defaults to 1 to 6 variables.
    type Parameters = Option<(usize, usize)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (min_variables, max_variables) = params.unwrap_or((1, 6));
        (min_variables..=max_variables)
            .prop_flat_map(|variable_count| {
                // Generate somewhere between 1 minterm and the whole truth table.
                let universe = 1_u32 << variable_count;
                (
                    Just(variable_count),
                    prop::collection::btree_set(0..universe, 1..=universe as usize),
                )
            })
            .prop_map(|(variable_count, minterms)| {
                Problem::new(variable_count, minterms).expect("generated problems are in range")
            })
            .boxed()
    }
}
