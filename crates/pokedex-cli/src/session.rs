//! Menu-driven console session over a registry
//!
//! Every registry error is printed and the current menu continues. Only
//! end of input or a failed write ends the session early.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use pokedex::report::{self, write_listing};
use pokedex::{CreatureRecord, Evolution, Filter, PokedexError, Registry, Starter, Traversal};
use tracing::debug;

use crate::input::{EndOfInput, LineSource};

const MAIN_MENU: &str = "\n=== Main Menu ===\n\
1. New Pokedex\n\
2. Existing Pokedex\n\
3. Delete a Pokedex\n\
4. Display owners by number of Pokemon\n\
5. Print All\n\
6. Exit";

const OWNER_MENU: &str = "1. Add Pokemon\n\
2. Display Pokedex\n\
3. Release Pokemon\n\
4. Evolve Pokemon\n\
5. Back to Main";

const FILTER_MENU: &str = "\n-- Display Filter Menu --\n\
1. Only a certain Type\n\
2. Only Evolvable\n\
3. Only Attack above __\n\
4. Only HP above __\n\
5. Only names starting with letter(s)\n\
6. All of them!\n\
7. Back";

/// An interactive session: one registry, one input, one output.
pub struct Session<I, W> {
    registry: Registry,
    input: I,
    out: W,
    json: bool,
}

impl<I: LineSource, W: Write> Session<I, W> {
    /// Create a session. With `json` set, listings and the size report are
    /// printed as JSON.
    pub fn new(registry: Registry, input: I, out: W, json: bool) -> Self {
        Self {
            registry,
            input,
            out,
            json,
        }
    }

    /// The registry driven by this session.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run the main menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        match self.main_menu() {
            Err(e) if e.is::<EndOfInput>() => {
                debug!("input closed, ending session");
                writeln!(self.out)?;
                Ok(())
            }
            other => other,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Input Helpers
    // ═══════════════════════════════════════════════════════════════════

    fn read_text(&mut self, prompt: &str) -> Result<String> {
        Ok(self.input.read_line(prompt)?.trim().to_string())
    }

    /// Re-prompt until an integer is entered.
    fn read_int(&mut self, prompt: &str) -> Result<i64> {
        loop {
            let line = self.read_text(prompt)?;
            match line.parse::<i64>() {
                Ok(n) => return Ok(n),
                Err(_) => writeln!(self.out, "Invalid input.")?,
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Main Menu
    // ═══════════════════════════════════════════════════════════════════

    fn main_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{}", MAIN_MENU)?;
            match self.read_int("Your choice: ")? {
                1 => self.create_pokedex()?,
                2 => self.existing_pokedex()?,
                3 => self.delete_pokedex()?,
                4 => self.sort_owners()?,
                5 => self.print_all()?,
                6 => {
                    writeln!(self.out, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice.")?,
            }
        }
    }

    fn create_pokedex(&mut self) -> Result<()> {
        let name = self.read_text("Owner name: ")?;
        if self.registry.find_owner(&name).is_ok() {
            let err = PokedexError::DuplicateOwner(name);
            writeln!(self.out, "{}", err)?;
            return Ok(());
        }

        writeln!(
            self.out,
            "Choose your starter Pokemon:\n1) Treecko\n2) Torchic\n3) Mudkip"
        )?;
        let starter = match Starter::try_from(self.read_int("Your choice: ")?) {
            Ok(starter) => starter,
            Err(_) => {
                writeln!(self.out, "Invalid choice. No new Pokedex created.")?;
                return Ok(());
            }
        };

        match self.registry.create_owner(&name, starter) {
            Ok(record) => writeln!(
                self.out,
                "New Pokedex created for {} with starter {}.",
                name, record.name
            )?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn delete_pokedex(&mut self) -> Result<()> {
        let name = self.read_text("Enter owner to delete: ")?;
        match self.registry.delete_owner(&name) {
            Ok(()) => writeln!(
                self.out,
                "Deleting {}'s entire Pokedex...\nPokedex deleted.",
                name
            )?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn sort_owners(&mut self) -> Result<()> {
        let summaries = self.registry.sort_report();
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&summaries)?)?;
        } else {
            report::write_size_report(&mut self.out, &summaries)?;
        }
        Ok(())
    }

    fn print_all(&mut self) -> Result<()> {
        writeln!(self.out, "1) BFS\n2) Pre-Order\n3) In-Order\n4) Post-Order")?;
        match Traversal::try_from(self.read_int("Your choice: ")?) {
            Ok(order) => {
                for owner in self.registry.traverse(order) {
                    report::write_owner(&mut self.out, owner)?;
                }
            }
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Owner Menu
    // ═══════════════════════════════════════════════════════════════════

    fn existing_pokedex(&mut self) -> Result<()> {
        let query = self.read_text("Owner name: ")?;
        let owner = match self.registry.find_owner(&query) {
            Ok(node) => node.name().to_string(),
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(());
            }
        };

        loop {
            writeln!(self.out, "\n-- {}'s Pokedex Menu --\n{}", owner, OWNER_MENU)?;
            match self.read_int("Your choice: ")? {
                1 => self.add_pokemon(&owner)?,
                2 => self.filter_menu(&owner)?,
                3 => self.release_pokemon(&owner)?,
                4 => self.evolve_pokemon(&owner)?,
                5 => {
                    writeln!(self.out, "Back to Main Menu.")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice.")?,
            }
        }
    }

    fn add_pokemon(&mut self, owner: &str) -> Result<()> {
        let id = self.read_int("Enter Pokemon ID to add: ")?;
        match self.registry.add_creature(owner, id) {
            Ok(record) => writeln!(
                self.out,
                "Pokemon {} (ID {}) added to {}'s Pokedex.",
                record.name, record.id, owner
            )?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn release_pokemon(&mut self, owner: &str) -> Result<()> {
        let name = self.read_text("Enter Pokemon Name to release: ")?;
        match self.registry.release_creature(owner, &name) {
            Ok(record) => writeln!(self.out, "Releasing {} from {}.", record.name, owner)?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn evolve_pokemon(&mut self, owner: &str) -> Result<()> {
        let name = self.read_text("Enter Pokemon Name to evolve: ")?;
        let outcome = match self.registry.evolve_creature(owner, &name) {
            Ok(outcome) => outcome,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(());
            }
        };

        let (from, to) = (outcome.original(), outcome.evolved());
        writeln!(
            self.out,
            "Pokemon evolved from {} (ID {}) to {} (ID {}).",
            from.name, from.id, to.name, to.id
        )?;
        if matches!(outcome, Evolution::ReleasedDuplicate { .. }) {
            writeln!(
                self.out,
                "{} was already present; releasing it immediately.",
                to.name
            )?;
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Filter Menu
    // ═══════════════════════════════════════════════════════════════════

    fn filter_menu(&mut self, owner: &str) -> Result<()> {
        loop {
            writeln!(self.out, "{}", FILTER_MENU)?;
            let filter = match self.read_int("Your choice: ")? {
                1 => Filter::Type(self.read_text("Which Type? (e.g. GRASS, WATER): ")?),
                2 => Filter::CanEvolve,
                3 => Filter::AttackAbove(self.read_int("Enter Attack threshold: ")?),
                4 => Filter::HpAbove(self.read_int("Enter HP threshold: ")?),
                5 => Filter::NamePrefix(self.read_text("Starting letter(s): ")?),
                6 => Filter::All,
                7 => {
                    writeln!(self.out, "Back to Pokedex Menu.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    continue;
                }
            };

            match self.registry.list_filtered(owner, &filter) {
                Ok(records) => self.show(&records)?,
                Err(e) => writeln!(self.out, "{}", e)?,
            }
        }
    }

    fn show(&mut self, records: &[Arc<CreatureRecord>]) -> Result<()> {
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(records)?)?;
        } else {
            write_listing(&mut self.out, records)?;
        }
        Ok(())
    }
}
