// =====================================================================
// File: queue.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 20, 2025
//
// Description:
//   Singly linked FIFO of record references, the hand-off between the
//   indexed searches and the tree builder.
//
//   Link nodes live in an arena (`Vec<QueueNode>`) and point at each
//   other by slot index. Dequeued slots go onto a free list and are reused
//   by later enqueues, so a long-lived queue does not keep growing.
//
// Invariants:
//   * `front.is_none()` iff `size == 0`
//   * following `next` from `front` visits exactly `size` nodes, ending
//     at `rear`, whose `next` is `None`
//   * the queue owns its link nodes, never the records
// =====================================================================

use crate::record::Record;

#[derive(Debug)]
struct QueueNode<'a> {
    record: &'a Record,
    next: Option<usize>,
}

/// FIFO of borrowed records.
#[derive(Debug, Default)]
pub struct RecordQueue<'a> {
    nodes: Vec<QueueNode<'a>>,
    free: Vec<usize>,
    front: Option<usize>,
    rear: Option<usize>,
    size: usize,
}


impl<'a> RecordQueue<'a> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            front: None,
            rear: None,
            size: 0,
        }
    }

    /// Appends a reference at the rear. O(1).
    ///
    /// # Example
    /// ```
    /// use bookindex::{Codec, Record, RecordQueue};
    /// let a = Record::from_text(Codec::Cp866, "a", "", "", 0, 1);
    /// let b = Record::from_text(Codec::Cp866, "b", "", "", 0, 2);
    /// let mut q = RecordQueue::new();
    /// q.enqueue(&a);
    /// q.enqueue(&b);
    /// assert_eq!(q.dequeue().map(|r| r.pages), Some(1));
    /// assert_eq!(q.len(), 1);
    /// ```
    pub fn enqueue(&mut self, record: &'a Record) {
        let node = QueueNode { record, next: None };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        match self.rear {
            Some(rear) => self.nodes[rear].next = Some(slot),
            None => self.front = Some(slot),
        }
        self.rear = Some(slot);
        self.size += 1;
    }

    /// Removes the front reference. `None` on an empty queue.
    pub fn dequeue(&mut self) -> Option<&'a Record> {
        let slot = self.front?;
        let node = &self.nodes[slot];
        let record = node.record;

        self.front = node.next;
        if self.front.is_none() {
            self.rear = None;
        }
        self.free.push(slot);
        self.size -= 1;
        Some(record)
    }

    /// Front reference without removing it.
    pub fn front(&self) -> Option<&'a Record> {
        self.front.map(|slot| self.nodes[slot].record)
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    /// Dequeues until empty, then releases the arena. The records are
    /// untouched. Clearing an empty queue does nothing.
    pub fn clear(&mut self) {
        while self.dequeue().is_some() {}
        self.nodes.clear();
        self.free.clear();
    }

    /// Walks the queue front to rear.
    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            queue: self,
            cursor: self.front,
        }
    }
}


impl<'a> FromIterator<&'a Record> for RecordQueue<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Record>>(iter: I) -> Self {
        let mut queue = RecordQueue::new();
        for record in iter {
            queue.enqueue(record);
        }
        queue
    }
}


/// Front-to-rear iterator over a [`RecordQueue`].
pub struct Iter<'q, 'a> {
    queue: &'q RecordQueue<'a>,
    cursor: Option<usize>,
}


impl<'a> Iterator for Iter<'_, 'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = &self.queue.nodes[slot];
        self.cursor = node.next;
        Some(node.record)
    }
}


impl<'q, 'a> IntoIterator for &'q RecordQueue<'a> {
    type Item = &'a Record;
    type IntoIter = Iter<'q, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
