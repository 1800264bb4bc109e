use crate::components::bar_chart::auto_max;
use dioxus::prelude::*;

/// SVG path through the present points, bridging over missing ones.
pub fn line_path(values: &[Option<f64>], max: f64, width: f64, height: f64) -> String {
    if values.is_empty() || max <= 0.0 {
        return String::new();
    }
    let slot = width / values.len() as f64;

    let mut path = String::new();
    for (i, v) in values.iter().enumerate() {
        let Some(v) = v else { continue };
        let x = (i as f64 + 0.5) * slot;
        let y = height - (v / max).clamp(0.0, 1.0) * height;
        let cmd = if path.is_empty() { "M" } else { " L" };
        path.push_str(&format!("{} {} {}", cmd, x, y));
    }
    path
}

#[component]
pub fn LineChart(
    values: Vec<Option<f64>>,
    labels: Vec<String>,
    #[props(default = String::new())] unit: String,
    color: String,
    #[props(default = 1000)] width: u32,
    #[props(default = 300)] height: u32,
) -> Element {
    let mut hovered = use_signal(|| None::<usize>);

    if values.iter().all(Option::is_none) {
        return rsx! {
            div { class: "h-full w-full flex items-center justify-center text-gray-400 italic", "No data available" }
        };
    }

    let max = auto_max(values.iter().flatten().copied());
    let path_data = line_path(&values, max, width as f64, height as f64);
    let slot = width as f64 / values.len() as f64;
    let y_of = move |v: f64| height as f64 - (v / max).clamp(0.0, 1.0) * height as f64;
    let count = values.len();
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i, i as f64 * slot, (i as f64 + 0.5) * slot, v.map(y_of)))
        .collect::<Vec<_>>();

    let area_data = {
        let first = values.iter().position(Option::is_some).unwrap_or(0);
        let last = values.iter().rposition(Option::is_some).unwrap_or(0);
        format!(
            "{} L {} {} L {} {} Z",
            path_data,
            (last as f64 + 0.5) * slot,
            height,
            (first as f64 + 0.5) * slot,
            height
        )
    };

    let y_labels = (0..=4)
        .map(|i| {
            let pct = i as f64 / 4.0 * 100.0;
            let val = max - i as f64 / 4.0 * max;
            (pct, val)
        })
        .collect::<Vec<_>>();

    rsx! {
        div { class: "relative w-full h-full pt-2 pb-8 pl-2 pr-14",
            svg {
                width: "100%",
                height: "100%",
                view_box: "0 0 {width} {height}",
                preserve_aspect_ratio: "none",
                class: "overflow-visible",
                onmouseleave: move |_| hovered.set(None),

                for i in 0..=4 {
                    {
                        let y = (height as f64 / 4.0) * i as f64;
                        rsx! {
                            line {
                                x1: "0", y1: "{y}", x2: "{width}", y2: "{y}",
                                stroke: "currentColor", stroke_width: "0.5", class: "text-gray-200 dark:text-gray-700",
                                vector_effect: "non-scaling-stroke"
                            }
                        }
                    }
                }

                path { d: "{area_data}", fill: "{color}", fill_opacity: "0.2", stroke: "none" }
                path {
                    d: "{path_data}",
                    fill: "none",
                    stroke: "{color}",
                    stroke_width: "2",
                    stroke_linejoin: "round",
                    stroke_linecap: "round",
                    vector_effect: "non-scaling-stroke"
                }

                for (i, left, cx, cy) in points {
                    if let Some(cy) = cy {
                        circle {
                            cx: "{cx}",
                            cy: "{cy}",
                            r: if hovered() == Some(i) { "5" } else { "3" },
                            fill: "{color}",
                        }
                    }
                    rect {
                        x: "{left}",
                        y: "0",
                        width: "{slot}",
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
                for (pct, val) in y_labels {
                    span {
                        class: "absolute right-1 text-[10px] font-bold text-gray-400 dark:text-white whitespace-nowrap",
                        style: "top: {pct}%; transform: translateY(-50%);",
                        if val >= 10.0 {
                            "{val:.0}{unit}"
                        } else {
                            "{val:.2}{unit}"
                        }
                    }
                }
            }

            if let Some((i, Some(v))) = hovered().map(|i| (i, values.get(i).copied().flatten())) {
                {
                    let x_pct = (i as f64 + 0.5) / count as f64 * 100.0;
                    let y_pct = y_of(v) / height as f64 * 100.0;
                    let label = labels.get(i).cloned().unwrap_or_default();
                    let is_top = y_pct < 20.0;
                    let transform_style = format!(
                        "translate({}, {})",
                        if x_pct > 80.0 { "-100%" } else { "-50%" },
                        if is_top { "10px" } else { "-120%" }
                    );
                    rsx! {
                        div {
                            class: "absolute z-10 pointer-events-none bg-white dark:bg-gray-800 rounded shadow-lg p-2 border border-gray-200 dark:border-gray-700 text-xs",
                            style: "left: {x_pct}%; top: {y_pct}%; transform: {transform_style};",
                            div { class: "font-bold text-gray-700 dark:text-gray-200 whitespace-nowrap", "{label}" }
                            div { class: "text-gray-600 dark:text-gray-400 whitespace-nowrap", "{v:.6}{unit}" }
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
    fn path_skips_gaps() {
        let path = line_path(&[None, Some(0.0), None, Some(10.0)], 10.0, 400.0, 100.0);
        assert_eq!(path, "M 150 100 L 350 0");
    }

    #[test]
    fn empty_path() {
        assert_eq!(line_path(&[None, None], 1.0, 100.0, 100.0), "");
        assert_eq!(line_path(&[], 1.0, 100.0, 100.0), "");
    }
}
