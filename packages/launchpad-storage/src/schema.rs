pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_profiles.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_profiles.sql")),
				"tables/002_user_preferences.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_user_preferences.sql")),
				"tables/003_startups.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_startups.sql")),
				"tables/004_follows.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_follows.sql")),
				"tables/005_comments.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_comments.sql")),
				"tables/006_comment_votes.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_comment_votes.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
