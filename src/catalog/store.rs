//! Catalog implementation
//!
//! Arena-backed doubly linked list of books.

use super::{Book, Removal, Submission};

/// Handle to a stored book.
///
/// Carries the slot generation, so a handle to a removed book never resolves
/// to whatever later reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Node {
    book: Book,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    node: Option<Node>,
}

/// Where a node sits in the list. Derived from its links, so exactly one
/// variant applies to any live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Sole,
    Head { next: usize },
    Tail { prev: usize },
    Interior { prev: usize, next: usize },
}

impl Position {
    fn of(node: &Node) -> Self {
        match (node.prev, node.next) {
            (None, None) => Position::Sole,
            (None, Some(next)) => Position::Head { next },
            (Some(prev), None) => Position::Tail { prev },
            (Some(prev), Some(next)) => Position::Interior { prev, next },
        }
    }
}

/// Ordered, in-memory book catalog
#[derive(Debug, Default)]
pub struct Catalog {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Books in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            catalog: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Look up a book by handle
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .map(|node| &node.book)
    }

    /// Append `book` unless an identical triple is already stored
    pub fn submit(&mut self, book: Book) -> Submission {
        let duplicate = self
            .iter()
            .any(|stored| stored.matches(&book.title, &book.author, &book.location));
        if duplicate {
            return Submission::Duplicate;
        }
        Submission::Submitted(self.push_back(book))
    }

    /// Every book by `author`
    pub fn find_by_author(&self, author: &str) -> Vec<Book> {
        self.find(|book| book.author == author)
    }

    /// Every book titled `title`
    pub fn find_by_title(&self, title: &str) -> Vec<Book> {
        self.find(|book| book.title == title)
    }

    /// Every copy of `title` by `author`
    pub fn find_by_title_and_author(&self, title: &str, author: &str) -> Vec<Book> {
        self.find(|book| book.title == title && book.author == author)
    }

    /// Copies of every book matching `predicate`, in insertion order
    pub fn find<P>(&self, mut predicate: P) -> Vec<Book>
    where
        P: FnMut(&Book) -> bool,
    {
        self.iter().filter(|book| predicate(book)).cloned().collect()
    }

    /// Remove the first book matching the full triple
    pub fn remove(&mut self, title: &str, author: &str, location: &str) -> Removal {
        let found = self.position(|book| book.matches(title, author, location));
        match found.and_then(|index| self.unlink(index)) {
            Some(book) => Removal::Removed(book),
            None => Removal::NotFound,
        }
    }

    /// Remove a book by handle
    pub fn remove_id(&mut self, id: BookId) -> Option<Book> {
        self.get(id)?;
        self.unlink(id.index)
    }

    /// Drop every book
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.node.take().is_some() {
                slot.generation += 1;
            }
        }
        self.free = (0..self.slots.len()).rev().collect();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn position<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&Book) -> bool,
    {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.slots[index].node.as_ref()?;
            if predicate(&node.book) {
                return Some(index);
            }
            cursor = node.next;
        }
        None
    }

    fn push_back(&mut self, book: Book) -> BookId {
        let node = Node {
            book,
            prev: self.tail,
            next: None,
        };

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => self.set_next(tail, Some(index)),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        BookId {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Detach the node in slot `index` and free the slot
    fn unlink(&mut self, index: usize) -> Option<Book> {
        let slot = self.slots.get_mut(index)?;
        let node = slot.node.take()?;
        slot.generation += 1;

        match Position::of(&node) {
            Position::Sole => {
                self.head = None;
                self.tail = None;
            }
            Position::Head { next } => {
                self.set_prev(next, None);
                self.head = Some(next);
            }
            Position::Tail { prev } => {
                self.set_next(prev, None);
                self.tail = Some(prev);
            }
            Position::Interior { prev, next } => {
                self.set_next(prev, Some(next));
                self.set_prev(next, Some(prev));
            }
        }

        self.free.push(index);
        self.len -= 1;
        Some(node.book)
    }

    fn set_prev(&mut self, index: usize, prev: Option<usize>) {
        if let Some(node) = self.slots[index].node.as_mut() {
            node.prev = prev;
        }
    }

    fn set_next(&mut self, index: usize, next: Option<usize>) {
        if let Some(node) = self.slots[index].node.as_mut() {
            node.next = next;
        }
    }
}

/// Iterator over a catalog in insertion order
pub struct Iter<'a> {
    catalog: &'a Catalog,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = self.catalog.slots[index].node.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.book)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
