// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! ECharts configurations for the dashboard donut and the evolution charts.
//!
//! A chart is owned by the [`ChartSlot`] of the session that drew it and is
//! released when the next chart replaces it.

use crate::engine::{CategorySeries, CategoryTotal, DailyTotals, PeriodFilter, SeriesDirection};
use crate::models::TxKind;
use anyhow::{Context, Result};
use charming::{
    Chart,
    component::{Axis, Legend, Title},
    datatype::DataPointItem,
    element::{AxisType, ItemStyle, Tooltip, Trigger},
    series::{Line, Pie},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::path::Path;

const INCOME_COLOR: &str = "#34D399";
const EXPENSE_COLOR: &str = "#EF4444";
const MIXED_COLOR: &str = "#868686";

/// A drawn chart together with the element id it renders into.
pub struct ChartHandle {
    pub id: &'static str,
    pub chart: Chart,
}

impl ChartHandle {
    pub fn options(&self) -> String {
        self.chart.to_string()
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js"></script>
</head>
<body>
<div id="{id}" style="width: 100%; height: 480px;"></div>
<script>
(function() {{
    const chart = echarts.init(document.getElementById("{id}"));
    chart.setOption({options});
    window.addEventListener('resize', chart.resize);
}})();
</script>
</body>
</html>
"#,
            id = self.id,
            options = self.options()
        )
    }

    pub fn write_html(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_html())
            .with_context(|| format!("Write chart to {}", path.display()))
    }
}

#[derive(Default)]
pub struct ChartSlot {
    current: Option<ChartHandle>,
}

impl ChartSlot {
    /// Installs `handle`, releasing whatever chart was there before.
    pub fn replace(&mut self, handle: ChartHandle) -> &ChartHandle {
        if let Some(old) = self.current.take() {
            tracing::debug!(id = old.id, "released chart");
        }
        self.current.insert(handle)
    }

    pub fn current(&self) -> Option<&ChartHandle> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or_default()
}

/// Y axis ceiling: half again above the largest value, never below `floor`.
pub fn y_axis_max(values: impl IntoIterator<Item = Decimal>, floor: Decimal) -> Decimal {
    let max = values.into_iter().fold(floor, Decimal::max);
    max.saturating_mul(Decimal::new(15, 1))
}

pub fn donut_chart(
    buckets: &[CategoryTotal],
    direction: TxKind,
    period: &PeriodFilter,
) -> ChartHandle {
    let title = match direction {
        TxKind::Expense => "Expenses by category",
        TxKind::Income => "Income by category",
    };
    let data: Vec<DataPointItem> = buckets
        .iter()
        .map(|b| {
            DataPointItem::new(to_f64(b.total))
                .name(b.label.as_str())
                .item_style(ItemStyle::new().color(b.color.as_str()))
        })
        .collect();

    let chart = Chart::new()
        .title(Title::new().text(title).subtext(period.to_string()))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .series(
            Pie::new()
                .name(title)
                .radius(vec!["50%", "70%"])
                .data(data),
        );
    ChartHandle {
        id: "donut-chart",
        chart,
    }
}

pub fn total_evolution_chart(days: &[DailyTotals]) -> ChartHandle {
    let labels: Vec<String> = days.iter().map(|d| d.day.to_string()).collect();
    let income: Vec<f64> = days.iter().map(|d| to_f64(d.income)).collect();
    let expense: Vec<f64> = days.iter().map(|d| to_f64(d.expense)).collect();
    let max = y_axis_max(
        days.iter().flat_map(|d| [d.income, d.expense]),
        Decimal::ONE,
    );

    let chart = Chart::new()
        .title(Title::new().text("Total evolution"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new())
        .x_axis(Axis::new().type_(AxisType::Category).name("Date").data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Amount ($)")
                .min(0)
                .max(to_f64(max)),
        )
        .series(
            Line::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(income),
        )
        .series(
            Line::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expense),
        );
    ChartHandle {
        id: "evolution-chart",
        chart,
    }
}

pub fn category_evolution_chart(series: &CategorySeries) -> ChartHandle {
    let labels: Vec<String> = series.points.iter().map(|(d, _)| d.to_string()).collect();
    let values: Vec<f64> = series.points.iter().map(|(_, v)| to_f64(*v)).collect();
    let color = match series.direction {
        Some(SeriesDirection::Income) => INCOME_COLOR,
        Some(SeriesDirection::Expense) => EXPENSE_COLOR,
        Some(SeriesDirection::Mixed) | None => MIXED_COLOR,
    };
    let max = if series.points.is_empty() {
        Decimal::ONE_HUNDRED
    } else {
        y_axis_max(series.points.iter().map(|(_, v)| *v), Decimal::ZERO)
    };

    let chart = Chart::new()
        .title(Title::new().text(series.name.as_str()))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .x_axis(Axis::new().type_(AxisType::Category).name("Date").data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Amount ($)")
                .min(0)
                .max(to_f64(max)),
        )
        .series(
            Line::new()
                .name(series.name.as_str())
                .item_style(ItemStyle::new().color(color))
                .data(values),
        );
    ChartHandle {
        id: "evolution-chart",
        chart,
    }
}
