use {
    anyhow::{Context, Result},
    ethpool::{AddressBook, InterfaceDescriptor, UserReference},
    std::{fs, path::Path},
};

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {what} {}", path.display()))
}

/// Load the contract ABI (bare array or build artifact).
pub fn load_descriptor(path: &Path) -> Result<InterfaceDescriptor> {
    let contents = read(path, "ABI file")?;
    InterfaceDescriptor::from_json_str(&contents)
        .with_context(|| format!("Failed to parse ABI {}", path.display()))
}

pub fn load_address_book(path: &Path) -> Result<AddressBook> {
    let contents = read(path, "address book")?;
    AddressBook::from_json_str(&contents)
        .with_context(|| format!("Failed to parse address book {}", path.display()))
}

pub fn load_user_reference(path: &Path) -> Result<UserReference> {
    let contents = read(path, "user file")?;
    UserReference::from_json_str(&contents)
        .with_context(|| format!("Failed to parse user file {}", path.display()))
}
