use proptest::prelude::*;
use svgchart::core::scale::uniform_padding;
use svgchart::core::{ChartSeries, ChartType, DataPoint, RenderOptions, ValueScale};
use svgchart::render::{PieChart, render_chart};

fn series_of(values: &[f64]) -> ChartSeries {
    ChartSeries::new(
        values
            .iter()
            .enumerate()
            .map(|(index, value)| DataPoint::new(format!("p{index}"), *value))
            .collect(),
    )
}

proptest! {
    #[test]
    fn pie_percentages_sum_to_one_hundred(
        values in prop::collection::vec(0.0f64..1.0e6, 1..40)
            .prop_filter("positive total", |v| v.iter().sum::<f64>() > 0.0)
    ) {
        let chart = PieChart::new(series_of(&values), RenderOptions::default());
        let slices = chart.slices().expect("positive total yields slices");
        let sum: f64 = slices.iter().map(|slice| slice.percentage).sum();
        prop_assert!((sum - 100.0).abs() <= 0.1, "sum was {sum}");

        let last = slices.last().expect("non-empty");
        prop_assert!((last.end_angle - 270.0).abs() <= 1e-6);
    }

    #[test]
    fn uniform_scale_is_strictly_ordered(value in -1.0e12f64..1.0e12) {
        let scale = ValueScale::new(value, value).expect("uniform scale");
        let (min, max) = scale.domain();
        prop_assert!(min < max);
        prop_assert!((max - value - uniform_padding(value)).abs() <= (value.abs() + 1.0) * 1e-12);
    }

    #[test]
    fn uniform_series_render_without_artifacts(
        value in -1.0e9f64..1.0e9,
        count in 1usize..12,
        chart_type in prop::sample::select(vec![ChartType::Line, ChartType::Bar])
    ) {
        let options = RenderOptions::default().with_chart_type(chart_type);
        let markup = render_chart(series_of(&vec![value; count]), options).expect("render");
        prop_assert!(!markup.contains("NaN"));
        prop_assert!(!markup.contains("inf"));
    }

    #[test]
    fn line_markers_match_point_count(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..50)
    ) {
        let markup = render_chart(series_of(&values), RenderOptions::default()).expect("render");
        prop_assert_eq!(markup.matches(r#"class="point""#).count(), values.len());
        prop_assert_eq!(markup.matches("<path").count(), 1);
    }
}
