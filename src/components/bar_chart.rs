use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lay out one bar per value in a `width` x `height` box scaled to `max`.
/// Values outside `0..=max` are drawn at the nearest edge.
pub fn layout_bars(values: &[f64], max: f64, width: f64, height: f64) -> Vec<Bar> {
    if values.is_empty() || max <= 0.0 {
        return Vec::new();
    }
    let slot = width / values.len() as f64;
    let gap = slot * 0.15;

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let h = (v / max).clamp(0.0, 1.0) * height;
            Bar {
                x: i as f64 * slot + gap / 2.0,
                y: height - h,
                width: slot - gap,
                height: h,
            }
        })
        .collect()
}

/// Largest value, with headroom, for charts without a fixed scale.
pub fn auto_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

#[component]
pub fn BarChart(
    values: Vec<f64>,
    labels: Vec<String>,
    /// Hover text per bar.
    value_labels: Vec<String>,
    max: f64,
    /// Y positions of dashed guide lines, with their axis text.
    #[props(default)]
    guides: Vec<(f64, String)>,
    color: String,
    #[props(default = 1000)] width: u32,
    #[props(default = 300)] height: u32,
) -> Element {
    let mut hovered = use_signal(|| None::<usize>);

    if values.is_empty() {
        return rsx! {
            div { class: "h-full w-full flex items-center justify-center text-gray-400 italic", "No data available" }
        };
    }

    let bars = layout_bars(&values, max, width as f64, height as f64);
    let y_of = move |v: f64| height as f64 - (v / max).clamp(0.0, 1.0) * height as f64;
    let count = values.len();

    rsx! {
        div { class: "relative w-full h-full pt-2 pb-8 pl-2 pr-14",
            svg {
                width: "100%",
                height: "100%",
                view_box: "0 0 {width} {height}",
                preserve_aspect_ratio: "none",
                class: "overflow-visible",
                onmouseleave: move |_| hovered.set(None),

                for (v, _) in guides.iter() {
                    {
                        let y = y_of(*v);
                        rsx! {
                            line {
                                x1: "0", y1: "{y}", x2: "{width}", y2: "{y}",
                                stroke: "currentColor", stroke_width: "1", stroke_dasharray: "5 5",
                                class: "text-gray-300 dark:text-gray-600",
                                vector_effect: "non-scaling-stroke"
                            }
                        }
                    }
                }

                for (i, bar) in bars.into_iter().enumerate() {
                    rect {
                        x: "{bar.x}",
                        y: "{bar.y}",
                        width: "{bar.width}",
                        height: "{bar.height}",
                        fill: "{color}",
                        fill_opacity: if hovered() == Some(i) { "1" } else { "0.7" },
                    }
                    // Full-height hit target so empty bars can be hovered too
                    rect {
                        x: "{bar.x}",
                        y: "0",
                        width: "{bar.width}",
                        height: "{height}",
                        fill: "transparent",
                        style: "pointer-events: all",
                        onmouseenter: move |_| hovered.set(Some(i)),
                    }
                }
            }

            div { class: "absolute bottom-0 left-2 right-14 h-6 pointer-events-none",
                for (i, label) in labels.iter().enumerate() {
                    {
                        let pct = (i as f64 + 0.5) / count as f64 * 100.0;
                        rsx! {
                            span {
                                class: "absolute text-[10px] font-bold text-gray-400 dark:text-white whitespace-nowrap",
                                style: "left: {pct}%; transform: translateX(-50%) rotate(-45deg);",
                                "{label}"
                            }
                        }
                    }
                }
            }

            div { class: "absolute top-2 bottom-8 right-0 w-14 pointer-events-none",
                for (v, text) in guides.iter() {
                    {
                        let pct = y_of(*v) / height as f64 * 100.0;
                        rsx! {
                            span {
                                class: "absolute right-1 text-[10px] font-bold text-gray-400 dark:text-white whitespace-nowrap",
                                style: "top: {pct}%; transform: translateY(-50%);",
                                "{text}"
                            }
                        }
                    }
                }
            }

            if let Some(i) = hovered() {
                {
                    let x_pct = (i as f64 + 0.5) / count as f64 * 100.0;
                    let label = labels.get(i).cloned().unwrap_or_default();
                    let value = value_labels.get(i).cloned().unwrap_or_default();
                    let shift = if x_pct > 80.0 { "-100%" } else { "-50%" };
                    rsx! {
                        div {
                            class: "absolute top-0 z-10 pointer-events-none bg-white dark:bg-gray-800 rounded shadow-lg p-2 border border-gray-200 dark:border-gray-700 text-xs",
                            style: "left: {x_pct}%; transform: translateX({shift});",
                            div { class: "font-bold text-gray-700 dark:text-gray-200 whitespace-nowrap", "{label}" }
                            div { class: "text-gray-600 dark:text-gray-400 whitespace-nowrap", "{value}" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_fill_their_slots() {
        let bars = layout_bars(&[0.0, 30.0, 60.0, 90.0], 60.0, 400.0, 300.0);

        assert_eq!(bars.len(), 4);
        assert_eq!(bars[0].height, 0.0);
        assert_eq!(bars[1].height, 150.0);
        assert_eq!(bars[1].y, 150.0);
        assert_eq!(bars[2].height, 300.0);
        assert_eq!(bars[3].height, 300.0);
        assert!(bars[1].x > bars[0].x + bars[0].width);
    }

    #[test]
    fn auto_max_headroom() {
        assert_eq!(auto_max([0.0, 0.0]), 1.0);
        assert_eq!(auto_max(std::iter::empty()), 1.0);
        assert!((auto_max([2.0, 10.0, f64::NAN]) - 11.0).abs() < 1e-9);
    }
}
