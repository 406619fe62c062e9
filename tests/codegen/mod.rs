mod tests_emit;
mod tests_generator;
mod tests_imports;
mod tests_wrappers;
