const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

#[derive(Debug, Clone, Default)]
pub(crate) struct LoadingState {
    frame_index: usize,
}

impl LoadingState {
    pub(crate) fn next_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % FRAMES.len();
    }

    pub(crate) fn reset(&mut self) {
        self.frame_index = 0;
    }

    pub(crate) fn current_frame(&self) -> &'static str {
        FRAMES[self.frame_index]
    }
}

#[cfg(test)]
mod tests {
    use super::{FRAMES, LoadingState};

    #[test]
    fn frames_wrap_around() {
        let mut loading = LoadingState::default();
        assert_eq!(loading.current_frame(), FRAMES[0]);

        for _ in 0..FRAMES.len() {
            loading.next_frame();
        }
        assert_eq!(loading.current_frame(), FRAMES[0]);

        loading.next_frame();
        assert_eq!(loading.current_frame(), FRAMES[1]);
        loading.reset();
        assert_eq!(loading.current_frame(), FRAMES[0]);
    }
}
