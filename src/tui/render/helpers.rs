/// Build a fixed-width progress bar like `████████░░░░░░░░`
pub(super) fn progress_bar(percentage: u8, width: usize) -> String {
    let filled = (percentage as usize * width) / 100;
    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push('\u{2588}');
    }
    for _ in filled..width {
        bar.push('\u{2591}');
    }
    bar
}
