/// Identifier assigned by a store on first persistence.
/// `0` means the entity has not been persisted yet.
pub type ID = i64;

pub trait Entity {
    fn id(&self) -> ID;
    fn set_id(&mut self, id: ID);

    fn is_persisted(&self) -> bool {
        self.id() != 0
    }
}
