//! Message structure: named groups of segments and nested groups.
//!
//! A [`Message`] is a tree. Its root [`Group`] is named after the message structure
//! (`ORU_R01`), and every group holds an ordered list of children. Encoding walks the tree in
//! pre-order, so the position of a segment among its siblings is its position on the wire.

use crate::segment::Segment;
use crate::{Delimiters, Hl7Error, Hl7Result, SEGMENT_TERMINATOR};

/// A node in the message tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Structure {
    Segment(Segment),
    Group(Group),
}

impl Structure {
    pub fn name(&self) -> &str {
        match self {
            Structure::Segment(segment) => segment.name().as_str(),
            Structure::Group(group) => group.name(),
        }
    }
}

impl From<Segment> for Structure {
    fn from(segment: Segment) -> Self {
        Structure::Segment(segment)
    }
}

impl From<Group> for Structure {
    fn from(group: Group) -> Self {
        Structure::Group(group)
    }
}

/// A named, ordered collection of segments and groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    name: String,
    children: Vec<Structure>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the direct children, in order.
    pub fn names(&self) -> Vec<&str> {
        self.children.iter().map(Structure::name).collect()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Structure] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Structure> {
        self.children.get(index)
    }

    /// Appends a child.
    pub fn push(&mut self, structure: impl Into<Structure>) {
        self.children.push(structure.into());
    }

    /// Inserts a child at `index`, shifting later children back.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::InsertionOutOfRange`] if `index` is past the end of the group.
    pub fn insert(&mut self, index: usize, structure: impl Into<Structure>) -> Hl7Result<()> {
        if index > self.children.len() {
            return Err(Hl7Error::InsertionOutOfRange {
                group: self.name.clone(),
                index,
                len: self.children.len(),
            });
        }
        self.children.insert(index, structure.into());
        Ok(())
    }

    /// First direct child segment called `name`.
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.children.iter().find_map(|child| match child {
            Structure::Segment(segment) if segment.name().as_str() == name => Some(segment),
            _ => None,
        })
    }

    /// First direct child group called `name`.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.children.iter().find_map(|child| match child {
            Structure::Group(group) if group.name == name => Some(group),
            _ => None,
        })
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.children.iter_mut().find_map(|child| match child {
            Structure::Group(group) if group.name == name => Some(group),
            _ => None,
        })
    }

    /// Follows a path of nested group names, starting below this group.
    pub fn group_path(&self, path: &[&str]) -> Hl7Result<&Group> {
        let mut current = self;
        for name in path {
            current = current
                .group(name)
                .ok_or_else(|| not_found(&self.name, path))?;
        }
        Ok(current)
    }

    pub fn group_path_mut(&mut self, path: &[&str]) -> Hl7Result<&mut Group> {
        let root = self.name.clone();
        let mut current = self;
        for name in path {
            current = current
                .group_mut(name)
                .ok_or_else(|| not_found(&root, path))?;
        }
        Ok(current)
    }

    /// Every segment below this group, in wire order.
    pub fn segments(&self) -> Vec<&Segment> {
        let mut out = Vec::new();
        collect_segments(self, &mut out);
        out
    }
}

fn not_found(root: &str, path: &[&str]) -> Hl7Error {
    let mut full = String::from(root);
    for name in path {
        full.push('/');
        full.push_str(name);
    }
    Hl7Error::StructureNotFound(full)
}

fn collect_segments<'a>(group: &'a Group, out: &mut Vec<&'a Segment>) {
    for child in &group.children {
        match child {
            Structure::Segment(segment) => out.push(segment),
            Structure::Group(group) => collect_segments(group, out),
        }
    }
}

/// A complete message tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    root: Group,
}

impl Message {
    /// Creates an empty message whose root group is named `structure_name`.
    pub fn new(structure_name: impl Into<String>) -> Self {
        Self {
            root: Group::new(structure_name),
        }
    }

    pub fn structure_name(&self) -> &str {
        self.root.name()
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Group at `path` below the root; an empty path is the root itself.
    pub fn group_path_mut(&mut self, path: &[&str]) -> Hl7Result<&mut Group> {
        self.root.group_path_mut(path)
    }

    /// Every segment of the message, in wire order.
    pub fn segments(&self) -> Vec<&Segment> {
        self.root.segments()
    }

    /// Delimiters declared by the message header, or the defaults when there is no header.
    pub fn delimiters(&self) -> Hl7Result<Delimiters> {
        let header = self
            .segments()
            .into_iter()
            .find(|segment| segment.name().is_header());
        match header {
            Some(msh) => Delimiters::parse(
                msh.get_at(1, 0, 1, 1).unwrap_or("|"),
                msh.get_at(2, 0, 1, 1).unwrap_or("^~\\&"),
            ),
            None => Ok(Delimiters::default()),
        }
    }

    /// Encodes the message, terminating every segment with a carriage return.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::InvalidDelimiters`] if MSH-1/MSH-2 hold unusable delimiters.
    pub fn encode(&self) -> Hl7Result<String> {
        let delimiters = self.delimiters()?;
        let mut out = String::new();
        for segment in self.segments() {
            out.push_str(&segment.encode(&delimiters));
            out.push(SEGMENT_TERMINATOR);
        }
        Ok(out)
    }
}
