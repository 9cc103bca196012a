//! Property tests for the adapter contracts.

use polars::prelude::{Column, DataFrame};
use proptest::prelude::*;
use tablekit_frame::Frame;
use tablekit_transform::{
    AssignRule, AssignTransformer, KeepFeatures, NameTransformer, Transform,
};

fn frame_of(xs: &[i64], ys: &[i64]) -> Frame {
    Frame::new(
        DataFrame::new(vec![
            Column::new("x".into(), xs.to_vec()),
            Column::new("y".into(), ys.to_vec()),
        ])
        .unwrap(),
    )
}

proptest! {
    #[test]
    fn assign_keeps_every_input_column_and_adds_assigned(
        values in prop::collection::vec(-1_000i64..1_000, 1..24),
        constant in -1_000i64..1_000,
    ) {
        let frame = frame_of(&values, &values);
        let transformer = AssignTransformer::new([("z", AssignRule::constant(constant))]);

        let out = transformer.transform(&frame).unwrap();

        prop_assert_eq!(out.column_names(), vec!["x", "y", "z"]);
        prop_assert_eq!(out.height(), frame.height());
        let z = out.data().column("z").unwrap().i64().unwrap();
        prop_assert!(z.into_iter().all(|v| v == Some(constant)));
    }

    #[test]
    fn constant_assign_is_idempotent(
        values in prop::collection::vec(-1_000i64..1_000, 1..24),
        constant in -1_000i64..1_000,
    ) {
        let frame = frame_of(&values, &values);
        let transformer = AssignTransformer::new([("z", AssignRule::constant(constant))]);

        let once = transformer.transform(&frame).unwrap();
        let twice = transformer.transform(&once).unwrap();

        prop_assert!(twice.data().equals(once.data()));
    }

    #[test]
    fn keep_none_schema_is_exactly_the_rename_targets(
        values in prop::collection::vec(-1_000i64..1_000, 1..24),
    ) {
        let frame = frame_of(&values, &values);
        let transformer =
            NameTransformer::new([("y", "b"), ("x", "a")], KeepFeatures::None).unwrap();

        let out = transformer.transform(&frame).unwrap();

        prop_assert_eq!(out.column_names(), vec!["b", "a"]);
        prop_assert_eq!(out.height(), frame.height());
    }

    #[test]
    fn keep_all_preserves_shape(
        values in prop::collection::vec(-1_000i64..1_000, 1..24),
    ) {
        let frame = frame_of(&values, &values);
        let transformer = NameTransformer::new([("x", "a")], KeepFeatures::All).unwrap();

        let out = transformer.transform(&frame).unwrap();

        prop_assert_eq!(out.height(), frame.height());
        prop_assert_eq!(out.width(), frame.width());
        prop_assert_eq!(out.column_names(), vec!["a", "y"]);
    }
}
