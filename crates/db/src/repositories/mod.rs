pub mod slot_document;
