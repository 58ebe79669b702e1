//! Standalone SVG charts: loss curves and data histograms.

use std::path::Path;

use crate::error::Result;
use crate::train::history::History;

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 240.0;
const PAD_L: f64 = 64.0;
const PAD_R: f64 = 16.0;
const PAD_T: f64 = 28.0;
const PAD_B: f64 = 30.0;

const GREY_GRID: &str = "#f0f2f5";
const GREY_TEXT: &str = "#999";
const DARK_TEXT: &str = "#333";
const RED_DARK: &str = "#dc2626";
const BLUE_DARK: &str = "#1e40af";

// ---------------------------------------------------------------------------
// Loss curve
// ---------------------------------------------------------------------------

/// Train (solid) and validation (dashed) loss per epoch.
pub fn loss_curve_svg(history: &History, title: &str) -> String {
    let train_pts = history.train_losses();
    let val_pts: Vec<f64> = history.epochs.iter().filter_map(|s| s.val_loss).collect();
    let n = train_pts.len();

    if n < 2 {
        return document(title, "<text x=\"64\" y=\"60\" fill=\"#999\" font-size=\"12\">Not enough epochs to draw a curve.</text>");
    }

    let max_y = train_pts.iter().chain(val_pts.iter()).cloned().fold(0.0f64, f64::max) * 1.05;
    let min_y = 0.0f64;

    let px = |i: usize, v: f64| -> (f64, f64) {
        let x = PAD_L + (i as f64 / (n - 1) as f64) * (WIDTH - PAD_L - PAD_R);
        let y = PAD_T + (max_y - v) / (max_y - min_y + 1e-12) * (HEIGHT - PAD_T - PAD_B);
        (x, y)
    };
    let path = |pts: &[f64]| -> String {
        pts.iter().enumerate().map(|(i, &v)| {
            let (x, y) = px(i, v);
            if i == 0 { format!("M{:.1},{:.1}", x, y) } else { format!(" L{:.1},{:.1}", x, y) }
        }).collect()
    };

    let train_path = path(&train_pts);
    let val_path = if val_pts.len() == n { path(&val_pts) } else { String::new() };

    let y_labels = y_axis(min_y, max_y);

    let x_labels: String = [0, n / 2, n - 1].iter().map(|&i| {
        let (x, _) = px(i, 0.0);
        format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\">{}</text>",
            x, HEIGHT - 8.0, GREY_TEXT, i + 1
        )
    }).collect::<Vec<_>>().join("\n");

    let mut body = format!(
        "{}\n{}\n<path d=\"{}\" stroke=\"{}\" stroke-width=\"2\" fill=\"none\"/>",
        y_labels, x_labels, train_path, RED_DARK
    );

    let ll = PAD_L + 22.0;
    body.push_str(&format!(
        "\n<rect x=\"{:.1}\" y=\"{:.1}\" width=\"18\" height=\"4\" fill=\"{}\"/>\n\
         <text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"10\">train loss</text>",
        PAD_L, PAD_T - 12.0, RED_DARK, ll, PAD_T - 8.0, DARK_TEXT
    ));

    if !val_path.is_empty() {
        body.push_str(&format!(
            "\n<path d=\"{}\" stroke=\"{}\" stroke-width=\"1.5\" fill=\"none\" stroke-dasharray=\"5,4\"/>\n\
             <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1.5\" stroke-dasharray=\"4,3\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"10\">val loss</text>",
            val_path, BLUE_DARK,
            ll + 60.0, PAD_T - 10.0, ll + 78.0, PAD_T - 10.0, BLUE_DARK,
            ll + 82.0, PAD_T - 6.0, DARK_TEXT
        ));
    }

    document(title, &body)
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Bar chart of pre-computed bin counts spanning `[lo, hi]`.
pub fn histogram_svg(counts: &[usize], lo: f64, hi: f64, title: &str) -> String {
    if counts.is_empty() {
        return document(title, "");
    }

    let max_count = counts.iter().copied().max().unwrap_or(0).max(1) as f64;
    let plot_w = WIDTH - PAD_L - PAD_R;
    let plot_h = HEIGHT - PAD_T - PAD_B;
    let bar_w = plot_w / counts.len() as f64;

    let bars: String = counts.iter().enumerate().map(|(i, &c)| {
        let h = c as f64 / max_count * plot_h;
        format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>",
            PAD_L + i as f64 * bar_w,
            PAD_T + plot_h - h,
            (bar_w - 1.0).max(0.5),
            h,
            BLUE_DARK
        )
    }).collect::<Vec<_>>().join("\n");

    let x_labels = format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"start\" fill=\"{}\" font-size=\"10\">{}</text>\n\
         <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" fill=\"{}\" font-size=\"10\">{}</text>",
        PAD_L, HEIGHT - 8.0, GREY_TEXT, lo,
        WIDTH - PAD_R, HEIGHT - 8.0, GREY_TEXT, hi
    );

    document(title, &format!("{}\n{}\n{}", y_axis(0.0, max_count), bars, x_labels))
}

pub fn write_svg(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn y_axis(min_y: f64, max_y: f64) -> String {
    (0..=4).map(|g| {
        let frac = g as f64 / 4.0;
        let val = min_y + (max_y - min_y) * frac;
        let y = PAD_T + (1.0 - frac) * (HEIGHT - PAD_T - PAD_B);
        format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" fill=\"{}\" font-size=\"10\">{:.3}</text>\n\
             <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>",
            PAD_L - 4.0, y + 4.0, GREY_TEXT, val,
            PAD_L, y, WIDTH - PAD_R, y, GREY_GRID
        )
    }).collect::<Vec<_>>().join("\n")
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" font-family=\"sans-serif\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n\
         <text x=\"{:.1}\" y=\"12\" text-anchor=\"middle\" fill=\"{}\" font-size=\"12\">{}</text>\n\
         {}\n\
         </svg>\n",
        WIDTH, HEIGHT, WIDTH / 2.0, DARK_TEXT, escape(title), body
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
