//! Scoring and collision against the pipe stream
//!
//! Passage is judged by centers: the bird has passed a pipe once its center x reaches
//! the pipe's center x. That lags the true trailing-edge clearance, so collision also
//! tests the previously passed pipe.

use super::bird::Bird;
use super::stream::PipeStream;

/// Award a point if the bird's center reached the next pipe's center.
///
/// The stream cursor moves past the pipe on success, so each pipe scores at most once.
pub fn check_score(bird: &Bird, stream: &mut PipeStream, score: &mut u32) -> bool {
    let Some(next) = stream.next_pipe() else {
        return false;
    };
    if bird.center_x() >= next.center_x() {
        stream.mark_passed();
        *score += 1;
        true
    } else {
        false
    }
}

/// True if the bird overlaps either barrier of the next or previous pipe
pub fn check_collision(bird: &Bird, stream: &PipeStream) -> bool {
    let rect = bird.rect();
    stream.next_pipe().is_some_and(|p| p.overlaps(&rect))
        || stream.previous_pipe().is_some_and(|p| p.overlaps(&rect))
}
