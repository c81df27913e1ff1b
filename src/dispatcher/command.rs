/// A command token understood by the sorting firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub token: String,
}

impl Command {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }

    /// Bytes on the wire: the token followed by a newline.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.token.as_bytes().to_vec();
        bytes.push(b'\n');
        bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    entries: Vec<(String, Command)>,
}

impl CommandTable {
    pub fn new(entries: Vec<(String, Command)>) -> Self {
        Self { entries }
    }

    /// Case-insensitive lookup. Returns the canonical class name with the command.
    pub fn lookup(&self, class_name: &str) -> Option<(&str, &Command)> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(class_name))
            .map(|(name, command)| (name.as_str(), command))
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new(vec![
            ("Organik".to_string(), Command::new("A")),
            ("Anorganik".to_string(), Command::new("B")),
            ("B3".to_string(), Command::new("C")),
        ])
    }
}
