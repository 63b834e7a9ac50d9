use ahash::AHashSet;
use arrayvec::ArrayVec;
use glam::Vec3A;

/// A face contact carries the face's three corners, a vertex contact a single point
pub const MAX_CONTACT_POINTS: usize = 3;

/// One detected penetration event, as seen by one of the two bodies involved.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing away from the other body's surface, towards this body
    pub normal: Vec3A,
    /// World-space points sharing the response equally
    pub points: ArrayVec<Vec3A, MAX_CONTACT_POINTS>,
}

impl Contact {
    /// Contact for the body whose vertex went through a face
    #[must_use]
    pub fn vertex(point: Vec3A, normal: Vec3A) -> Self {
        let mut points = ArrayVec::new();
        points.push(point);

        Self { normal, points }
    }

    /// Contact for the body whose face was crossed
    #[must_use]
    pub fn face(corners: [Vec3A; 3], normal: Vec3A) -> Self {
        Self {
            normal,
            points: ArrayVec::from(corners),
        }
    }

    #[must_use]
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Bits of the normal then the points, `-0.0` folded into `0.0`, unused slots `u32::MAX`
    fn key(&self) -> ContactKey {
        let coords = std::iter::once(self.normal)
            .chain(self.points.iter().copied())
            .flat_map(|v| v.to_array());

        let mut key = [u32::MAX; CONTACT_KEY_LEN];
        for (slot, coord) in key.iter_mut().zip(coords) {
            *slot = (coord + 0.0).to_bits();
        }
        key
    }
}

const CONTACT_KEY_LEN: usize = 3 * (MAX_CONTACT_POINTS + 1);
type ContactKey = [u32; CONTACT_KEY_LEN];

/// Per-body scratch list of this frame's contacts.
///
/// Cleared rather than reallocated every frame,
/// so its capacity settles after the first few collisions.
#[derive(Clone, Debug, Default)]
pub struct ContactBuffer {
    records: Vec<Contact>,
    seen: AHashSet<ContactKey>,
}

impl ContactBuffer {
    /// Queues a contact, unless an identical one is already queued.
    ///
    /// Coincident vertices (a box corner shared by 3 sides) or a vertex on the edge between two
    /// faces report the same penetration more than once. Returns whether the contact was added.
    pub fn push(&mut self, contact: Contact) -> bool {
        debug_assert!(!contact.points.is_empty());
        debug_assert!(!contact.normal.is_nan());

        if !self.seen.insert(contact.key()) {
            return false;
        }

        self.records.push(contact);
        true
    }

    #[inline]
    pub fn clear(&mut self) {
        self.records.clear();
        self.seen.clear();
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[Contact] {
        &self.records
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.records.iter()
    }

    /// Total number of contact points over all records
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.records.iter().map(Contact::num_points).sum()
    }
}

impl<'a> IntoIterator for &'a ContactBuffer {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
