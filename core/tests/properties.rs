use pier_core::cuts::taper_cut_pair;
use pier_core::geometry::{centered_positions, skew_lateral_offset, LocalFrame};
use pier_core::params::StructureParameters;
use pier_core::validate_structure;
use proptest::prelude::*;

proptest! {
    #[test]
    fn centered_grid_is_symmetric(count in 1usize..40, spacing in 0.0f64..5000.0) {
        let positions = centered_positions(count, spacing);
        prop_assert_eq!(positions.len(), count);

        let mean = positions.iter().sum::<f64>() / count as f64;
        prop_assert!(mean.abs() < 1e-6);
        for (a, b) in positions.iter().zip(positions.iter().rev()) {
            prop_assert!((a + b).abs() < 1e-6);
        }
    }

    #[test]
    fn skew_offset_is_antisymmetric(length in 1.0f64..20000.0, skew in -60.0f64..60.0) {
        let plus = skew_lateral_offset(length / 2.0, length, skew);
        let minus = skew_lateral_offset(-length / 2.0, length, skew);
        prop_assert!((plus + minus).abs() < 1e-6);
        prop_assert!((plus.abs() - minus.abs()).abs() < 1e-6);
    }

    #[test]
    fn equal_lengths_give_parallel_taper_planes(
        half in 100.0f64..5000.0,
        height in 1.0f64..2000.0,
        yaw in 0.0f64..360.0,
    ) {
        let frame = LocalFrame::new(0.0, 0.0, yaw);
        let [neg, pos] = taper_cut_pair(&frame, 0.0, half, half, height);
        prop_assert!(neg.plane().is_parallel_to(&pos.plane()));
    }

    #[test]
    fn validation_is_repeatable(top in 0.0f64..6000.0, rows in 1u32..6, spacing in 0.0f64..3000.0) {
        let mut params = StructureParameters::default();
        params.cap.top_length = top;
        params.piles.rows = rows;
        params.piles.row_distance = spacing;
        prop_assert_eq!(validate_structure(&params), validate_structure(&params));
    }
}
