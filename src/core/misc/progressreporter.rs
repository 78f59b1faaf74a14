use indicatif::*;

/// Progress of a batch of Monte Carlo chunks; shareable across worker threads.
pub struct ProgressReporter {
    pb: ProgressBar,
}

impl ProgressReporter {
    pub fn new(total_work: usize, title: &str, quiet: bool) -> Self {
        if quiet {
            return ProgressReporter {
                pb: ProgressBar::hidden(),
            };
        }
        let pb = ProgressBar::new(total_work as u64);
        let template = format!("{{spinner:.bold.green}} {}: ", title)
            + "[{wide_bar:.cyan}] {pos}/{len} ({elapsed_precise}|{eta_precise}) ";
        if let Ok(style) = ProgressStyle::with_template(&template) {
            pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁  "));
        }
        pb.tick();
        ProgressReporter { pb }
    }

    pub fn update(&self, num: usize) {
        if num != 0 {
            self.pb.inc(num as u64);
        }
    }

    pub fn done(&self) {
        self.pb.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let p = ProgressReporter::new(10, "test", true);
        p.update(4);
        p.update(0);
        assert_eq!(p.pb.position(), 4);
        p.done();
    }
}
