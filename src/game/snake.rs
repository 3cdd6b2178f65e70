use std::collections::VecDeque;

use super::action::Direction;
use super::state::Point;

/// The snake: an ordered body with the head at the front
///
/// The snake knows nothing about the grid; keeping the field in sync with
/// the body is the environment's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
}

impl Snake {
    /// Create a snake heading north with its body trailing south of `head`
    ///
    /// A `length` of zero is treated as one.
    pub fn new(head: Point, length: usize) -> Self {
        let length = length.max(1);
        let tail_step = Direction::South.offset();
        let mut body = VecDeque::with_capacity(length);
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            segment = segment + tail_step;
        }

        Self {
            body,
            direction: Direction::North,
        }
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Body cells from head to tail
    pub fn body(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    /// Cell the head will occupy after the next move
    pub fn peek_next_move(&self) -> Point {
        self.head() + self.direction.offset()
    }

    pub fn turn_left(&mut self) {
        self.direction = self.direction.turned_left();
    }

    pub fn turn_right(&mut self) {
        self.direction = self.direction.turned_right();
    }

    /// Swap head and tail, then head outward from the old tail
    pub fn reverse_direction(&mut self) {
        self.direction = self.tail_direction();
        self.body.make_contiguous().reverse();
    }

    /// Extend the head one cell forward, keeping the tail in place
    pub fn grow(&mut self) {
        let next = self.peek_next_move();
        self.body.push_front(next);
    }

    /// Advance one cell forward, dropping the tail
    pub fn move_forward(&mut self) {
        let next = self.peek_next_move();
        self.body.push_front(next);
        self.body.pop_back();
    }

    /// Direction pointing out of the tail end of the body
    fn tail_direction(&self) -> Direction {
        let reversed = self.direction.turned_right().turned_right();
        if self.body.len() < 2 {
            return reversed;
        }
        let before_tail = self.body[self.body.len() - 2];
        Direction::from_offset(self.tail() - before_tail).unwrap_or(reversed)
    }
}
