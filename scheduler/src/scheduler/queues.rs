use super::{Policy, Process};

/// Ready processes, held as indices into the process list and ordered by
/// the active policy on every lookup.
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    policy: Policy,
    entries: Vec<usize>,
}

impl ReadyQueue {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, index: usize) {
        self.entries.push(index);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }

    fn head_position(&self, processes: &[Process]) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|&(_, &index)| self.policy.order_key(&processes[index], index))
            .map(|(position, _)| position)
    }

    pub fn peek(&self, processes: &[Process]) -> Option<usize> {
        self.head_position(processes)
            .map(|position| self.entries[position])
    }

    pub fn pop(&mut self, processes: &[Process]) -> Option<usize> {
        self.head_position(processes)
            .map(|position| self.entries.swap_remove(position))
    }
}

/// Blocked processes, drained in order of remaining I/O time.
#[derive(Debug, Clone, Default)]
pub struct BlockedQueue {
    entries: Vec<usize>,
}

impl BlockedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, index: usize) {
        self.entries.push(index);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }

    /// Removes and returns a process whose I/O burst has run out, if any.
    pub fn pop_completed(&mut self, processes: &[Process]) -> Option<usize> {
        let (position, &index) = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|&(_, &index)| (processes[index].io_burst_remaining(), index))?;
        if processes[index].io_burst_remaining() != 0 {
            return None;
        }
        self.entries.swap_remove(position);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessParams;

    fn processes(specs: &[(u32, u32, u32)]) -> Vec<Process> {
        specs
            .iter()
            .map(|&(arrival, cpu_time, ready_cycle)| {
                let mut process = Process::new(ProcessParams::new(arrival, 1, cpu_time, 1));
                process.run.ready_cycle = ready_cycle;
                process
            })
            .collect()
    }

    #[test]
    fn pops_in_policy_order_regardless_of_insertion() {
        let processes = processes(&[(0, 9, 4), (0, 3, 2), (1, 5, 2)]);
        let mut ready = ReadyQueue::new(Policy::Fcfs);
        ready.push(2);
        ready.push(0);
        ready.push(1);

        assert_eq!(ready.peek(&processes), Some(1));
        assert_eq!(ready.pop(&processes), Some(1));
        assert_eq!(ready.pop(&processes), Some(2));
        assert_eq!(ready.pop(&processes), Some(0));
        assert_eq!(ready.pop(&processes), None);
    }

    #[test]
    fn sjf_queue_prefers_least_remaining() {
        let processes = processes(&[(0, 9, 0), (0, 3, 5), (1, 5, 0)]);
        let mut ready = ReadyQueue::new(Policy::Sjf);
        for index in 0..3 {
            ready.push(index);
        }
        assert_eq!(ready.pop(&processes), Some(1));
        assert_eq!(ready.pop(&processes), Some(2));
        assert_eq!(ready.pop(&processes), Some(0));
    }

    #[test]
    fn blocked_queue_releases_only_finished_io() {
        let mut processes = processes(&[(0, 1, 0), (0, 1, 0), (0, 1, 0)]);
        processes[0].run.io_burst_remaining = 2;
        processes[1].run.io_burst_remaining = 0;
        processes[2].run.io_burst_remaining = 0;

        let mut blocked = BlockedQueue::new();
        for index in 0..3 {
            blocked.push(index);
        }
        let mut released = vec![
            blocked.pop_completed(&processes).unwrap(),
            blocked.pop_completed(&processes).unwrap(),
        ];
        released.sort();
        assert_eq!(released, vec![1, 2]);
        assert_eq!(blocked.pop_completed(&processes), None);
        assert_eq!(blocked.len(), 1);
    }
}
