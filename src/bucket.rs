//! Bucket: one key-value cell of a singly-linked collision chain.

/// Owned link to the next node of a chain, or to a chain head from a slot.
pub(crate) type Link = Option<Box<Bucket>>;

#[derive(Debug)]
pub(crate) struct Bucket {
    pub(crate) key: String,
    pub(crate) value: i32,
    pub(crate) next: Link,
}

impl Bucket {
    pub(crate) fn new(key: String, value: i32) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            next: None,
        })
    }
}

/// Borrowing iterator over the nodes of one chain, head first.
pub(crate) struct Chain<'a> {
    cur: Option<&'a Bucket>,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(head: &'a Link) -> Self {
        Self {
            cur: head.as_deref(),
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Bucket;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cur?;
        self.cur = node.next.as_deref();
        Some(node)
    }
}

/// Drop a chain iteratively. The derived drop would recurse once per node.
pub(crate) fn drop_chain(mut link: Link) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}
