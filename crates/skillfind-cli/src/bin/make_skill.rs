use anyhow::Result;
use clap::Parser;
use skillfind_cli::MakeArgs;
use skillfind_skills::{create_skill, ScaffoldOptions};

fn main() -> Result<()> {
    let args = MakeArgs::parse();
    skillfind_logging::init_logging(&args.log_level, args.log_format)?;
    let output_dir = args.output_dir();

    let options = ScaffoldOptions {
        author: args.author.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
    };
    let skill_dir = create_skill(&args.name, &output_dir, &options)?;

    println!("Created skill: {}", skill_dir.display());
    println!();
    println!("Next steps:");
    println!("  1. cd {}", skill_dir.display());
    println!("  2. Edit SKILL.md with your instructions");
    println!("  3. Add your code to scripts/");
    println!("  4. Check it is discoverable: find-skill --local-only {}", args.name);
    Ok(())
}
