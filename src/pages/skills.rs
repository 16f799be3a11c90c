use serde::Serialize;

pub struct Snippet {
    pub name: &'static str,
    pub code: &'static str,
}

pub const SNIPPETS: &[Snippet] = &[
    Snippet {
        name: "Javascript",
        code: r#"// Javascript
const names = ["Ada", "Grace", "Linus"];

function greeting() {
  const name = names.find((n) => n.startsWith("G"));
  return `Hello, ${name}!`;
}

console.log(greeting()); // Hello, Grace!"#,
    },
    Snippet {
        name: "Typescript",
        code: r#"// TypeScript
const names: string[] = ["Ada", "Grace", "Linus"];

function greeting(): string {
  const name: string | undefined = names.find((n) => n.startsWith("G"));
  return `Hello, ${name ?? "stranger"}!`;
}

console.log(greeting()); // Hello, Grace!"#,
    },
    Snippet {
        name: "Python",
        code: r#"# Python
names = ["Ada", "Grace", "Linus"]

def greeting():
    name = next((n for n in names if n.startswith("G")), "stranger")
    return f"Hello, {name}!"

print(greeting())  # Hello, Grace!"#,
    },
    Snippet {
        name: "PHP",
        code: r#"<?php
// PHP
$names = ["Ada", "Grace", "Linus"];

function greeting(array $names): string {
    foreach ($names as $name) {
        if (str_starts_with($name, "G")) {
            return "Hello, $name!";
        }
    }
    return "Hello, stranger!";
}

echo greeting($names); // Hello, Grace!"#,
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TechStack {
    pub name: &'static str,
    pub link: &'static str,
}

pub const TECH_STACKS: &[TechStack] = &[
    TechStack { name: "React", link: "https://react.dev" },
    TechStack { name: "Vue", link: "https://vuejs.org" },
    TechStack { name: "Next.js", link: "https://nextjs.org" },
    TechStack { name: "Node.js", link: "https://nodejs.org" },
    TechStack { name: "Django", link: "https://www.djangoproject.com" },
    TechStack { name: "Laravel", link: "https://laravel.com" },
    TechStack { name: "Tailwind CSS", link: "https://tailwindcss.com" },
    TechStack { name: "Bootstrap", link: "https://getbootstrap.com" },
    TechStack { name: "Supabase", link: "https://supabase.com" },
    TechStack { name: "Sanity", link: "https://www.sanity.io" },
    TechStack { name: "Redux", link: "https://redux.js.org" },
    TechStack { name: "Framer Motion", link: "https://motion.dev" },
];

/// Snippet for the requested tab; unknown or missing tabs fall back to the first.
pub fn select_snippet(tab: Option<&str>) -> &'static Snippet {
    tab.and_then(|tab| SNIPPETS.iter().find(|s| s.name.eq_ignore_ascii_case(tab)))
        .unwrap_or(&SNIPPETS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_snippet() {
        assert_eq!(select_snippet(None).name, "Javascript");
        assert_eq!(select_snippet(Some("python")).name, "Python");
        assert_eq!(select_snippet(Some("cobol")).name, "Javascript");
    }
}
