use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::output::{TableDisplay, Tone};
use crate::cli::{CliError, RepertoireCommands};
use crate::models::Repertoire;

impl CliCommand for RepertoireCommands {
    fn execute(&self, ctx: &mut CliContext) -> Result<(), CliError> {
        match self {
            RepertoireCommands::Create {
                name,
                audio_folder,
                sheet_folder,
                songlist_folder,
            } => {
                let id = ctx.db.create_repertoire(
                    name,
                    audio_folder.as_deref(),
                    sheet_folder.as_deref(),
                    songlist_folder.as_deref(),
                )?;
                ctx.output.notify(
                    &format!("Created repertoire '{}' with id {}", name, id),
                    Tone::Success,
                );
                Ok(())
            }
            RepertoireCommands::List => {
                let repertoires = ctx.db.list_repertoires()?;
                if repertoires.is_empty() {
                    ctx.output.notify("No repertoires yet", Tone::Info);
                    return Ok(());
                }
                ctx.output.print(&repertoires)
            }
        }
    }
}

impl TableDisplay for Vec<Repertoire> {
    fn columns(&self) -> Vec<&'static str> {
        vec![
            "id",
            "name",
            "audio_folder",
            "sheet_folder",
            "songlist_folder",
            "default_skills",
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|repertoire| {
                let skills = repertoire
                    .default_skills
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(";");
                vec![
                    repertoire.id.to_string(),
                    repertoire.name.clone(),
                    repertoire.audio_folder.clone().unwrap_or_default(),
                    repertoire.sheet_folder.clone().unwrap_or_default(),
                    repertoire.songlist_folder.clone().unwrap_or_default(),
                    skills,
                ]
            })
            .collect()
    }
}
