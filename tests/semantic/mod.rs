mod tests_lookup;
