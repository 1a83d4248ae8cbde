use tokio_util::sync::CancellationToken;

/// Tracks the single live task of one kind.
///
/// Every `begin` cancels the previous task and hands out a new generation;
/// results carrying any other generation are stale.
pub struct TaskSlot {
    parent: CancellationToken,
    generation: u64,
    token: Option<CancellationToken>,
}

impl TaskSlot {
    pub fn new(parent: CancellationToken) -> Self {
        Self {
            parent,
            generation: 0,
            token: None,
        }
    }

    /// Supersede whatever is running and start a new generation
    pub fn begin(&mut self) -> (u64, CancellationToken) {
        self.cancel();
        let token = self.parent.child_token();
        self.token = Some(token.clone());
        (self.generation, token)
    }

    /// Cancel the live task, if any. Its generation becomes stale.
    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Mark `generation` as delivered
    pub fn finish(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.token = None;
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.token.is_some() && self.generation == generation
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
